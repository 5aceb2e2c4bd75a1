//! Integration tests for node construction and link resolution

use pretty_assertions::assert_eq;

use schematic_layout::layout::{
    create_node, resolve_address, resolve_links, ApproximateMetrics, Connector, Endpoint,
    LayoutConfig, LayoutError, Location, NodeKind, NodeRegistry, VisualNode,
};
use schematic_layout::{build_schematic, Element, Settings};

fn metrics() -> ApproximateMetrics {
    ApproximateMetrics::default()
}

fn registry_for(root: &str, children: &[Element], config: &LayoutConfig) -> NodeRegistry {
    let mut registry = NodeRegistry::new();
    let root_node = create_node(NodeKind::Block, &Element::block(root), root, config, &metrics())
        .expect("root node");
    registry.insert(root_node).expect("insert root");
    for child in children {
        let path = format!("{}.{}", root, child.name);
        let node = create_node(child.kind, child, &path, config, &metrics()).expect("child node");
        registry.insert_child(root, node).expect("insert child");
    }
    registry
}

fn component(element: &Element, path: &str) -> Result<VisualNode, LayoutError> {
    create_node(NodeKind::Component, element, path, &LayoutConfig::default(), &metrics())
}

fn assert_on_grid(node: &VisualNode, grid: f64) {
    assert_eq!(node.size.width % grid, 0.0, "width of {} off grid", node.id);
    assert_eq!(node.size.height % grid, 0.0, "height of {} off grid", node.id);
    for group in &node.port_groups {
        let placement = group.placement.expect("group placed");
        assert_eq!(
            placement.center_offset % grid,
            0.0,
            "center of group {} on {} off grid",
            group.name,
            node.id
        );
    }
}

#[test]
fn test_default_group_scenario() {
    let element = Element::component("U1").with_pins(["vcc"]);
    let node = component(&element, "U1").unwrap();

    assert_eq!(node.port_groups.len(), 1);
    let group = &node.port_groups[0];
    assert_eq!(group.name, "top");
    assert_eq!(group.location, Location::Top);
    let paths: Vec<&str> = group.pins.iter().map(|p| p.path.as_str()).collect();
    assert_eq!(paths, vec!["U1.vcc"]);
}

#[test]
fn test_configured_group_scenario() {
    let element = Element::component("U1")
        .with_pins(["vcc"])
        .with_port("pwr", Location::Left)
        .with_pin_in_port("vcc", "pwr");
    let node = component(&element, "U1").unwrap();

    assert!(node.group("top").is_none());
    let pwr = node.group("pwr").unwrap();
    assert_eq!(pwr.location, Location::Left);
    assert_eq!(pwr.pins[0].name, "vcc");
}

#[test]
fn test_every_pin_in_exactly_one_group() {
    let element = Element::component("mcu")
        .with_pins(["vdd", "gnd", "tx", "rx", "sda", "scl", "nrst"])
        .with_port("power", Location::Left)
        .with_port("uart", Location::Right)
        .with_port("i2c", Location::Bottom)
        .with_pin_in_port("vdd", "power")
        .with_pin_in_port("gnd", "power")
        .with_pin_in_port("tx", "uart")
        .with_pin_in_port("rx", "uart")
        .with_pin_in_port("sda", "i2c")
        .with_pin_in_port("scl", "i2c");
    let node = component(&element, "top.mcu").unwrap();

    for pin in &element.pins {
        let path = format!("top.mcu.{}", pin.name);
        let holders = node
            .port_groups
            .iter()
            .filter(|g| g.pins.iter().any(|p| p.path == path))
            .count();
        assert_eq!(holders, 1, "pin {} held by {} groups", pin.name, holders);
    }
    assert_eq!(node.group("top").unwrap().pins[0].name, "nrst");
}

#[test]
fn test_sizes_and_centers_are_grid_aligned() {
    for grid in [5.0, 10.0, 20.0] {
        let config = LayoutConfig::default().with_grid_size(grid);
        let element = Element::component("regulator")
            .with_instance_of("parts.power.LinearRegulator")
            .with_pins(["input_voltage", "output", "gnd", "enable", "pg"])
            .with_port("in", Location::Left)
            .with_port("out", Location::Right)
            .with_pin_in_port("input_voltage", "in")
            .with_pin_in_port("enable", "in")
            .with_pin_in_port("output", "out")
            .with_pin_in_port("pg", "out");
        let node = create_node(NodeKind::Component, &element, "regulator", &config, &metrics())
            .unwrap();
        assert_on_grid(&node, grid);

        for pin in node.pins() {
            let position = pin.position.expect("pin placed");
            let along = if position.x == 0.0 || position.x == node.size.width {
                position.y
            } else {
                position.x
            };
            assert_eq!(along % grid, 0.0, "pin {} off grid", pin.path);
        }
    }
}

#[test]
fn test_resizing_is_idempotent() {
    let config = LayoutConfig::default();
    let mut registry = registry_for(
        "top",
        &[Element::component("a").with_pins(["x", "y"])],
        &config,
    );
    let before = registry.get("top.a").unwrap().clone();

    schematic_layout::layout::sizing::resize_to_content(
        registry.get_mut("top.a").unwrap(),
        &config,
        &metrics(),
    )
    .unwrap();
    schematic_layout::layout::sizing::resize_to_content(
        registry.get_mut("top.a").unwrap(),
        &config,
        &metrics(),
    )
    .unwrap();

    assert_eq!(registry.get("top.a").unwrap(), &before);
}

#[test]
fn test_resolution_depths() {
    let config = LayoutConfig::default();
    let mut registry = registry_for("root", &[Element::component("a").with_pins(["p"])], &config);

    let one = resolve_address("vin", "root", &mut registry, &config, &metrics()).unwrap();
    assert_eq!((one.node.as_str(), one.port.as_str()), ("root", "root.vin"));

    let two = resolve_address("a.p", "root", &mut registry, &config, &metrics()).unwrap();
    assert_eq!((two.node.as_str(), two.port.as_str()), ("root.a", "root.a.p"));

    let three = resolve_address("a.b.c", "root", &mut registry, &config, &metrics()).unwrap();
    assert_eq!((three.node.as_str(), three.port.as_str()), ("root.a", "root.a.b.c"));

    let a = registry.get("root.a").unwrap();
    let bottom = a.group("bottom").unwrap();
    assert_eq!(bottom.location, Location::Bottom);
    assert_eq!(bottom.pins.len(), 1);
    assert_eq!(bottom.pins[0].name, "c");
    assert_on_grid(a, config.grid_size);
}

#[test]
fn test_deep_synthesis_is_memoized() {
    let config = LayoutConfig::default();
    let mut registry = registry_for("root", &[Element::block("a")], &config);

    for _ in 0..3 {
        resolve_address("a.b.c", "root", &mut registry, &config, &metrics()).unwrap();
    }
    resolve_address("a.b.d", "root", &mut registry, &config, &metrics()).unwrap();

    let a = registry.get("root.a").unwrap();
    let names: Vec<&str> = a.pins().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["c", "d"]);
}

#[test]
fn test_cross_level_link_scenario() {
    let settings = Settings::default();
    let mut registry = registry_for(
        "top",
        &[Element::component("a").with_pins(["x"]), Element::block("b")],
        &settings.layout,
    );
    let top = Element::block("top").with_link("net1", "a.x", "b.y.z");

    let connectors = resolve_links(&top, "top", &mut registry, &settings, &metrics()).unwrap();

    assert_eq!(connectors.len(), 1);
    match &connectors[0] {
        Connector::Link(link) => {
            assert_eq!(link.source, Endpoint::new("top.a", "top.a.x"));
            assert_eq!(link.target, Endpoint::new("top.b", "top.b.y.z"));
        }
        Connector::Stub(_) => panic!("expected a through-link"),
    }
    let b = registry.get("top.b").unwrap();
    assert_eq!(b.pin("top.b.y.z").unwrap().name, "z");
}

#[test]
fn test_stub_and_link_are_exclusive() {
    let settings = Settings::default();
    let mut registry = registry_for(
        "top",
        &[
            Element::component("a").with_pins(["x"]),
            Element::component("b").with_pins(["y"]),
        ],
        &settings.layout,
    );
    let top = Element::block("top")
        .with_link("sig", "a.x", "b.y")
        .with_link("gnd", "a.x", "b.y")
        .with_stub("gnd");

    let connectors = resolve_links(&top, "top", &mut registry, &settings, &metrics()).unwrap();

    let sig: Vec<&Connector> = connectors.iter().filter(|c| c.name() == "sig").collect();
    let gnd: Vec<&Connector> = connectors.iter().filter(|c| c.name() == "gnd").collect();
    assert_eq!(sig.len(), 1);
    assert!(!sig[0].is_stub());
    assert_eq!(gnd.len(), 2);
    assert!(gnd.iter().all(|c| c.is_stub()));
}

#[test]
fn test_error_paths() {
    let config = LayoutConfig::default();

    let bad_group = Element::component("U1")
        .with_pins(["vcc"])
        .with_pin_in_port("vcc", "nope");
    let err = component(&bad_group, "top.U1").unwrap_err();
    assert!(matches!(err, LayoutError::PortGroupNotFound { .. }));

    let mut registry = registry_for("root", &[Element::block("a")], &config);
    let err = resolve_address("b.x", "root", &mut registry, &config, &metrics()).unwrap_err();
    assert!(matches!(err, LayoutError::UnresolvedAddress { .. }));

    let err = resolve_address("", "root", &mut registry, &config, &metrics()).unwrap_err();
    assert!(matches!(err, LayoutError::InvalidPortName { .. }));
}

#[test]
fn test_full_tree_every_node_on_grid() {
    let psu = Element::block("psu")
        .with_child(
            Element::component("ldo")
                .with_pins(["vin", "vout", "gnd"])
                .with_port("in", Location::Left)
                .with_port("out", Location::Right)
                .with_pin_in_port("vin", "in")
                .with_pin_in_port("vout", "out"),
        )
        .with_child(Element::component("c1").with_pins(["p1", "p2"]))
        .with_link("vout_net", "ldo.vout", "c1.p1")
        .with_link("gnd_net", "ldo.gnd", "c1.p2")
        .with_stub("gnd_net");
    let root = Element::block("board")
        .with_child(psu)
        .with_child(Element::component("mcu").with_pins(["vdd"]))
        .with_link("rail", "psu.ldo.vout", "mcu.vdd");

    let settings = Settings::default();
    let schematic = build_schematic(&root, &settings, &metrics()).unwrap();

    assert_eq!(schematic.nodes.len(), 5);
    for node in schematic.nodes.iter().filter(|n| n.content_sized) {
        assert_on_grid(node, settings.layout.grid_size);
    }
    let names: Vec<&str> = schematic.connectors.iter().map(|c| c.name()).collect();
    assert_eq!(names, vec!["vout_net", "gnd_net", "gnd_net", "rail"]);
    assert!(schematic.node("board.psu").unwrap().has_pin("board.psu.ldo.vout"));
}
