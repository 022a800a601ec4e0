use yangkit::context::{Context, ContextFlags};
use yangkit::schema::{
    DataValue, DataValueType, SchemaInputFormat, SchemaNodeKind,
    SchemaOutputFormat, SchemaPathFormat, SchemaPrinterFlags,
};

static SEARCH_DIR: &str = "./assets/yang/";

static TINY_MODULE: &str = r###"
    module tiny {
      namespace "urn:example:tiny";
      prefix tiny;

      leaf greeting {
        type string;
      }
    }"###;

fn create_context() -> Context {
    // Initialize context.
    let mut ctx =
        Context::with_searchdir(SEARCH_DIR, ContextFlags::NO_YANGLIBRARY)
            .expect("Failed to create context");

    // Load the test module with all of its features enabled.
    ctx.load_module("lab-inventory", None, &["power-control"])
        .expect("Failed to load module");

    ctx
}

#[test]
fn context_searchdirs() {
    let ctx = create_context();

    // Search paths are stored canonicalized.
    assert!(ctx.searchdirs().any(|sdir| sdir.ends_with("assets/yang")));
}

#[test]
fn context_module_lookups() {
    let ctx = create_context();

    assert!(ctx.get_module_latest("lab-inventory").is_some());
    assert!(ctx.get_module_implemented("lab-inventory").is_some());
    assert!(ctx.get_module("lab-inventory", Some("2024-11-02")).is_some());
    assert!(ctx.get_module_latest("no-such-module").is_none());

    assert!(ctx
        .modules()
        .any(|module| module.name() == "lab-inventory"));
}

#[test]
fn context_parse_module_string() {
    let mut ctx = create_context();

    let module = ctx
        .parse_module_string(TINY_MODULE, SchemaInputFormat::YANG, &[])
        .expect("Failed to parse module");
    assert_eq!(module.name(), "tiny");
    assert!(module.is_implemented());
}

#[test]
fn context_parse_module_string_invalid() {
    let mut ctx = create_context();

    assert!(ctx
        .parse_module_string(
            "module broken {",
            SchemaInputFormat::YANG,
            &[]
        )
        .is_err());
}

#[test]
fn schema_module_attributes() {
    let ctx = create_context();
    let module = ctx
        .get_module_latest("lab-inventory")
        .expect("Failed to lookup module");

    assert_eq!(module.name(), "lab-inventory");
    assert_eq!(module.revision(), Some("2024-11-02"));
    assert_eq!(module.namespace(), "urn:example:lab-inventory");
    assert_eq!(module.prefix(), "lab");
    assert!(module.description().is_some());
    assert!(module.organization().is_some());
    assert!(module.contact().is_some());
    assert!(module.filepath().is_some());
    assert!(module.is_implemented());
}

#[test]
fn schema_feature_value() {
    let ctx = create_context();
    let module = ctx
        .get_module_latest("lab-inventory")
        .expect("Failed to lookup module");

    assert_eq!(module.feature_value("power-control"), Ok(true));
    assert!(module.feature_value("no-such-feature").is_err());
}

#[test]
fn schema_print() {
    let ctx = create_context();
    let module = ctx
        .get_module_latest("lab-inventory")
        .expect("Failed to lookup module");

    let yang = module
        .print_string(SchemaOutputFormat::YANG, SchemaPrinterFlags::empty())
        .expect("Failed to print module");
    assert!(yang.contains("module lab-inventory"));
}

#[test]
fn schema_find_xpath() {
    let ctx = create_context();
    let snode = ctx.traverse().next().unwrap();

    assert_eq!(
        snode
            .find_xpath("/lab-inventory:inventory/*")
            .expect("Failed to lookup schema data")
            .map(|snode| snode.path(SchemaPathFormat::DATA))
            .collect::<Vec<String>>(),
        vec![
            "/lab-inventory:inventory/location",
            "/lab-inventory:inventory/machine",
        ]
    );

    assert_eq!(
        snode
            .find_xpath("/lab-inventory:inventory/machine/*")
            .expect("Failed to lookup schema data")
            .map(|snode| snode.path(SchemaPathFormat::DATA))
            .collect::<Vec<String>>(),
        vec![
            "/lab-inventory:inventory/machine/name",
            "/lab-inventory:inventory/machine/class",
            "/lab-inventory:inventory/machine/enabled",
            "/lab-inventory:inventory/machine/port",
            "/lab-inventory:inventory/machine/power-budget",
            "/lab-inventory:inventory/machine/counters",
        ]
    );
}

#[test]
fn schema_find_single() {
    let ctx = create_context();
    let snode_top = ctx.traverse().next().unwrap();

    assert!(snode_top
        .find_path("/lab-inventory:inventory/machine/*")
        .is_err());
    assert!(snode_top
        .find_path("/lab-inventory:inventory/machine")
        .is_ok());
    assert!(ctx
        .find_single("/lab-inventory:inventory/machine")
        .is_ok());
}

#[test]
fn schema_iterator_traverse() {
    let ctx = create_context();
    let snode_top = ctx.traverse().next().unwrap();

    assert_eq!(
        snode_top
            .traverse()
            .map(|snode| snode.path(SchemaPathFormat::DATA))
            .collect::<Vec<String>>(),
        vec![
            "/lab-inventory:inventory",
            "/lab-inventory:inventory/location",
            "/lab-inventory:inventory/machine",
            "/lab-inventory:inventory/machine/name",
            "/lab-inventory:inventory/machine/class",
            "/lab-inventory:inventory/machine/enabled",
            "/lab-inventory:inventory/machine/port",
            "/lab-inventory:inventory/machine/power-budget",
            "/lab-inventory:inventory/machine/counters",
            "/lab-inventory:inventory/machine/counters/restarts",
            "/lab-inventory:inventory/machine/counters/last-seen",
        ]
    );
}

#[test]
fn schema_iterator_ancestors() {
    let ctx = create_context();
    let snode_top = ctx.traverse().next().unwrap();

    assert_eq!(
        snode_top
            .find_path(
                "/lab-inventory:inventory/machine/counters/restarts"
            )
            .expect("Failed to lookup schema data")
            .ancestors()
            .map(|snode| snode.path(SchemaPathFormat::DATA))
            .collect::<Vec<String>>(),
        vec![
            "/lab-inventory:inventory/machine/counters",
            "/lab-inventory:inventory/machine",
            "/lab-inventory:inventory",
        ]
    );
}

#[test]
fn schema_iterator_siblings() {
    let ctx = create_context();
    let snode_top = ctx.traverse().next().unwrap();

    assert_eq!(
        snode_top
            .find_path("/lab-inventory:inventory/machine/name")
            .expect("Failed to lookup schema data")
            .siblings()
            .map(|snode| snode.path(SchemaPathFormat::DATA))
            .collect::<Vec<String>>(),
        vec![
            "/lab-inventory:inventory/machine/class",
            "/lab-inventory:inventory/machine/enabled",
            "/lab-inventory:inventory/machine/port",
            "/lab-inventory:inventory/machine/power-budget",
            "/lab-inventory:inventory/machine/counters",
        ]
    );
}

#[test]
fn schema_iterator_children() {
    let ctx = create_context();
    let snode_top = ctx.traverse().next().unwrap();

    assert_eq!(
        snode_top
            .find_path("/lab-inventory:inventory/machine/counters")
            .expect("Failed to lookup schema data")
            .children()
            .map(|snode| snode.path(SchemaPathFormat::DATA))
            .collect::<Vec<String>>(),
        vec![
            "/lab-inventory:inventory/machine/counters/restarts",
            "/lab-inventory:inventory/machine/counters/last-seen",
        ]
    );
}

#[test]
fn schema_node_attributes() {
    let ctx = create_context();
    let snode_top = ctx.traverse().next().unwrap();

    let snode = snode_top
        .find_path("/lab-inventory:inventory/machine/enabled")
        .expect("Failed to lookup schema node");
    assert_eq!(snode.name(), "enabled");
    assert_eq!(snode.kind(), SchemaNodeKind::Leaf);
    assert!(snode.description().is_some());
    assert!(snode.is_config());
    assert!(!snode.is_mandatory());
    assert!(snode.has_default());
    assert_eq!(snode.default_value_canonical(), Some("true"));
    assert_eq!(snode.default_value(), Some(DataValue::Bool(true)));
    let ltype = snode.leaf_type().expect("Failed to get leaf type");
    assert_eq!(ltype.base_type(), DataValueType::Bool);
    assert!(snode.units().is_none());
    assert!(snode.musts().next().is_none());
    assert!(snode.whens().next().is_none());

    let snode = snode_top
        .find_path("/lab-inventory:inventory/machine/power-budget")
        .expect("Failed to lookup schema node");
    assert_eq!(snode.units(), Some("watts"));

    let snode = snode_top
        .find_path("/lab-inventory:inventory/machine")
        .expect("Failed to lookup schema node");
    assert_eq!(snode.kind(), SchemaNodeKind::List);
    assert!(snode.is_config());
    assert!(!snode.is_keyless_list());
    assert!(!snode.is_user_ordered());
    assert_eq!(snode.min_elements(), None);
    assert_eq!(snode.max_elements(), None);
    assert_eq!(
        snode
            .list_keys()
            .map(|snode| snode.name().to_owned())
            .collect::<Vec<String>>(),
        vec!["name"]
    );

    let snode = snode_top
        .find_path("/lab-inventory:inventory/machine/counters")
        .expect("Failed to lookup schema node");
    assert_eq!(snode.kind(), SchemaNodeKind::Container);
    assert!(snode.is_state());
    assert!(snode.is_np_container());
}

#[test]
fn schema_rpc_nodes() {
    let ctx = create_context();
    let module = ctx
        .get_module_latest("lab-inventory")
        .expect("Failed to lookup module");

    let rpc = module.rpcs().next().expect("Failed to lookup RPC");
    assert_eq!(rpc.name(), "reboot");
    assert_eq!(rpc.kind(), SchemaNodeKind::Rpc);

    // The RPC input references a machine by leafref.
    let input = rpc
        .input()
        .expect("Missing RPC input")
        .next()
        .expect("Missing RPC input child");
    assert_eq!(input.name(), "machine");
    let ltype = input.leaf_type().expect("Failed to get leaf type");
    assert_eq!(ltype.base_type(), DataValueType::LeafRef);
    assert_eq!(
        ltype
            .leafref_real_type()
            .expect("Failed to resolve leafref")
            .base_type(),
        DataValueType::String
    );

    let output = rpc
        .output()
        .expect("Missing RPC output")
        .next()
        .expect("Missing RPC output child");
    assert_eq!(output.name(), "status");

    let notification = module
        .notifications()
        .next()
        .expect("Failed to lookup notification");
    assert_eq!(notification.name(), "machine-added");
}
