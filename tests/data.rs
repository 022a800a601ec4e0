use yangkit::context::{Context, ContextFlags};
use yangkit::data::{
    Data, DataDiffFlags, DataDiffOp, DataFormat, DataParserFlags,
    DataPrinterFlags, DataTree, DataValidationFlags,
};
use yangkit::schema::{DataValue, SchemaInputFormat};

static SEARCH_DIR: &str = "./assets/yang/";

static JSON_TREE1: &str = r###"
    {
        "lab-inventory:inventory": {
            "location": "bldg-2, room 17",
            "machine": [
                {
                    "name": "rk1",
                    "class": "server",
                    "enabled": true,
                    "port": 830
                },
                {
                    "name": "rk2",
                    "class": "switch",
                    "enabled": true,
                    "port": 831
                }
            ]
        }
    }"###;
static JSON_TREE2: &str = r###"
    {
        "lab-inventory:inventory": {
            "location": "bldg-2, room 17",
            "machine": [
                {
                    "name": "rk1",
                    "class": "server",
                    "enabled": false,
                    "port": 830
                },
                {
                    "name": "rk3",
                    "class": "sensor",
                    "enabled": true,
                    "port": 832
                }
            ]
        }
    }"###;
static JSON_MERGE: &str = r###"
    {
        "lab-inventory:inventory": {
            "location": "bldg-2, room 17",
            "machine": [
                {
                    "name": "rk1",
                    "class": "server",
                    "enabled": false,
                    "port": 830
                },
                {
                    "name": "rk2",
                    "class": "switch",
                    "enabled": true,
                    "port": 831
                },
                {
                    "name": "rk3",
                    "class": "sensor",
                    "enabled": true,
                    "port": 832
                }
            ]
        }
    }"###;
static JSON_NO_CLASS: &str = r###"
    {
        "lab-inventory:inventory": {
            "machine": [
                {
                    "name": "bad"
                }
            ]
        }
    }"###;
static JSON_WITH_DEFAULTS: &str = r###"
    {
        "lab-inventory:inventory": {
            "machine": [
                {
                    "name": "rk9",
                    "class": "server"
                }
            ]
        }
    }"###;

macro_rules! assert_data_eq {
    ($dtree1:expr, $dtree2:expr) => {
        let json1 = $dtree1
            .print_string(DataFormat::JSON, DataPrinterFlags::WITH_SIBLINGS)
            .expect("Failed to print data");
        let json2 = $dtree2
            .print_string(DataFormat::JSON, DataPrinterFlags::WITH_SIBLINGS)
            .expect("Failed to print data");

        assert_eq!(json1, json2);
    };
}

fn create_context() -> Context {
    // Initialize context.
    let mut ctx =
        Context::with_searchdir(SEARCH_DIR, ContextFlags::NO_YANGLIBRARY)
            .expect("Failed to create context");

    // Load the test module.
    ctx.load_module("lab-inventory", None, &["power-control"])
        .expect("Failed to load module");

    ctx
}

fn parse_json_data<'a>(ctx: &'a Context, string: &str) -> DataTree<'a> {
    DataTree::parse_string(
        ctx,
        string,
        DataFormat::JSON,
        DataParserFlags::NO_VALIDATION,
        DataValidationFlags::empty(),
    )
    .expect("Failed to parse data tree")
}

// Parse a schema module from a YIN file and an instance document from an XML
// file, then follow the schema back-reference of the top data node down to
// its first child.
#[test]
fn data_parse_yin_schema_and_xml_instance() {
    let mut ctx =
        Context::with_searchdir(SEARCH_DIR, ContextFlags::NO_YANGLIBRARY)
            .expect("Failed to create context");

    let module = ctx
        .parse_module_path(
            "./assets/yang/sensor-grid.yin",
            SchemaInputFormat::YIN,
            &[],
        )
        .expect("Failed to parse module");
    assert_eq!(module.name(), "sensor-grid");

    let dtree = DataTree::parse_path(
        &ctx,
        "./assets/data/sensor-grid.xml",
        DataFormat::XML,
        DataParserFlags::empty(),
        DataValidationFlags::empty(),
    )
    .expect("Failed to parse data tree");

    let top = dtree.reference().expect("Empty data tree");
    assert_eq!(top.schema().name(), "sensors");
    let child = top
        .schema()
        .children()
        .next()
        .expect("Missing child schema node");
    assert_eq!(child.name(), "sensor");
}

#[test]
fn data_find_xpath() {
    let ctx = create_context();
    let dtree1 = parse_json_data(&ctx, JSON_TREE1);

    assert_eq!(
        dtree1
            .find_xpath("/lab-inventory:inventory/machine")
            .expect("Failed to lookup data")
            .map(|dnode| dnode.path())
            .collect::<Vec<String>>(),
        vec![
            "/lab-inventory:inventory/machine[name='rk1']",
            "/lab-inventory:inventory/machine[name='rk2']",
        ]
    );

    assert_eq!(
        dtree1
            .find_xpath("/lab-inventory:inventory/machine[name='rk1']/*")
            .expect("Failed to lookup data")
            .map(|dnode| dnode.path())
            .collect::<Vec<String>>(),
        vec![
            "/lab-inventory:inventory/machine[name='rk1']/name",
            "/lab-inventory:inventory/machine[name='rk1']/class",
            "/lab-inventory:inventory/machine[name='rk1']/enabled",
            "/lab-inventory:inventory/machine[name='rk1']/port",
        ]
    );
}

#[test]
fn data_find_path() {
    let ctx = create_context();
    let dtree1 = parse_json_data(&ctx, JSON_TREE1);

    assert!(dtree1
        .find_path("/lab-inventory:inventory/machine[name='rk1']")
        .is_ok());
    assert!(dtree1
        .find_path("/lab-inventory:inventory/machine[name='rk7']")
        .is_err());
}

#[test]
fn data_node_values() {
    let ctx = create_context();
    let dtree1 = parse_json_data(&ctx, JSON_TREE1);

    let dnode = dtree1
        .find_path("/lab-inventory:inventory/machine[name='rk1']/port")
        .expect("Failed to lookup data");
    assert_eq!(dnode.value(), Some(DataValue::Uint16(830)));
    assert_eq!(dnode.value_canonical(), Some("830".to_owned()));

    let dnode = dtree1
        .find_path("/lab-inventory:inventory/machine[name='rk1']/enabled")
        .expect("Failed to lookup data");
    assert_eq!(dnode.value(), Some(DataValue::Bool(true)));

    let dnode = dtree1
        .find_path("/lab-inventory:inventory/machine[name='rk1']/name")
        .expect("Failed to lookup data");
    assert_eq!(dnode.value(), Some(DataValue::Other("rk1".to_owned())));
    assert_eq!(dnode.owner_module().name(), "lab-inventory");
}

#[test]
fn data_edit() {
    let ctx = create_context();
    let mut dtree1 = parse_json_data(&ctx, JSON_TREE1);
    let dtree2 = parse_json_data(&ctx, JSON_TREE2);

    enum Operation {
        Modify(&'static str, Option<&'static str>),
        Delete(&'static str),
    }

    let changes = [
        Operation::Modify(
            "/lab-inventory:inventory/machine[name='rk1']/enabled",
            Some("false"),
        ),
        Operation::Delete("/lab-inventory:inventory/machine[name='rk2']"),
        Operation::Modify(
            "/lab-inventory:inventory/machine[name='rk3']/class",
            Some("sensor"),
        ),
        Operation::Modify(
            "/lab-inventory:inventory/machine[name='rk3']/enabled",
            Some("true"),
        ),
        Operation::Modify(
            "/lab-inventory:inventory/machine[name='rk3']/port",
            Some("832"),
        ),
    ];
    for change in &changes {
        match change {
            Operation::Modify(xpath, value) => {
                dtree1
                    .new_path(xpath, *value, false)
                    .expect("Failed to edit data tree");
            }
            Operation::Delete(xpath) => {
                dtree1.remove(xpath).expect("Failed to edit data tree")
            }
        };
    }

    assert_data_eq!(&dtree1, &dtree2);
}

#[test]
fn data_validate() {
    let ctx = create_context();
    let mut dtree = parse_json_data(&ctx, JSON_NO_CLASS);

    // The mandatory "class" leaf instance is missing.
    assert!(dtree.validate(DataValidationFlags::PRESENT).is_err());
}

#[test]
fn data_implicit_defaults() {
    let ctx = create_context();

    // Full validation adds the implicit default nodes.
    let dtree = DataTree::parse_string(
        &ctx,
        JSON_WITH_DEFAULTS,
        DataFormat::JSON,
        DataParserFlags::empty(),
        DataValidationFlags::PRESENT,
    )
    .expect("Failed to parse data tree");

    let dnode = dtree
        .find_path("/lab-inventory:inventory/machine[name='rk9']/enabled")
        .expect("Failed to lookup data");
    assert!(dnode.is_default());
    assert_eq!(dnode.value(), Some(DataValue::Bool(true)));
}

#[test]
fn data_duplicate() {
    let ctx = create_context();
    let dtree1 = parse_json_data(&ctx, JSON_TREE1);
    let dup = dtree1.duplicate().expect("Failed to duplicate data");

    assert_data_eq!(&dtree1, &dup);
}

#[test]
fn data_merge() {
    let ctx = create_context();
    let mut dtree1 = parse_json_data(&ctx, JSON_TREE1);
    let dtree2 = parse_json_data(&ctx, JSON_TREE2);
    let dtree_merge = parse_json_data(&ctx, JSON_MERGE);

    dtree1.merge(&dtree2).expect("Failed to merge data trees");
    assert_data_eq!(&dtree1, &dtree_merge);
}

#[test]
fn data_diff() {
    let ctx = create_context();
    let dtree1 = parse_json_data(&ctx, JSON_TREE1);
    let dtree2 = parse_json_data(&ctx, JSON_TREE2);

    let diff = dtree1
        .diff(&dtree2, DataDiffFlags::empty())
        .expect("Failed to compare data trees");

    let mut changes = diff
        .iter()
        .map(|(op, dnode)| (op, dnode.path()))
        .collect::<Vec<(DataDiffOp, String)>>();
    changes.sort();

    assert_eq!(
        changes,
        vec![
            (
                DataDiffOp::Create,
                "/lab-inventory:inventory/machine[name='rk3']".to_owned()
            ),
            (
                DataDiffOp::Delete,
                "/lab-inventory:inventory/machine[name='rk2']".to_owned()
            ),
            (
                DataDiffOp::Replace,
                "/lab-inventory:inventory/machine[name='rk1']/enabled"
                    .to_owned()
            ),
        ]
    );
}

#[test]
fn data_diff_apply() {
    let ctx = create_context();
    let mut dtree1 = parse_json_data(&ctx, JSON_TREE1);
    let dtree2 = parse_json_data(&ctx, JSON_TREE2);

    let diff = dtree1
        .diff(&dtree2, DataDiffFlags::empty())
        .expect("Failed to compare data trees");
    dtree1.diff_apply(&diff).expect("Failed to apply diff");

    assert_data_eq!(&dtree1, &dtree2);
}

#[test]
fn data_diff_reverse() {
    let ctx = create_context();
    let mut dtree1 = parse_json_data(&ctx, JSON_TREE1);
    let dtree2 = parse_json_data(&ctx, JSON_TREE2);

    let diff = dtree1
        .diff(&dtree2, DataDiffFlags::empty())
        .expect("Failed to compare data trees");
    let reversed = diff.reverse().expect("Failed to reverse diff");

    dtree1.diff_apply(&diff).expect("Failed to apply diff");
    dtree1
        .diff_apply(&reversed)
        .expect("Failed to apply reversed diff");

    let dtree_orig = parse_json_data(&ctx, JSON_TREE1);
    assert_data_eq!(&dtree1, &dtree_orig);
}

#[test]
fn data_print_formats() {
    let ctx = create_context();
    let dtree1 = parse_json_data(&ctx, JSON_TREE1);

    let xml = dtree1
        .print_string(DataFormat::XML, DataPrinterFlags::WITH_SIBLINGS)
        .expect("Failed to print data");
    assert!(xml.contains("<inventory"));
    assert!(xml.contains("urn:example:lab-inventory"));

    let bytes = dtree1
        .print_bytes(DataFormat::LYB, DataPrinterFlags::WITH_SIBLINGS)
        .expect("Failed to print data");
    assert!(!bytes.is_empty());
}

#[test]
fn data_iterator_traverse() {
    let ctx = create_context();
    let dtree1 = parse_json_data(&ctx, JSON_TREE1);

    assert_eq!(
        dtree1
            .traverse()
            .map(|dnode| dnode.path())
            .collect::<Vec<String>>(),
        vec![
            "/lab-inventory:inventory",
            "/lab-inventory:inventory/location",
            "/lab-inventory:inventory/machine[name='rk1']",
            "/lab-inventory:inventory/machine[name='rk1']/name",
            "/lab-inventory:inventory/machine[name='rk1']/class",
            "/lab-inventory:inventory/machine[name='rk1']/enabled",
            "/lab-inventory:inventory/machine[name='rk1']/port",
            "/lab-inventory:inventory/machine[name='rk2']",
            "/lab-inventory:inventory/machine[name='rk2']/name",
            "/lab-inventory:inventory/machine[name='rk2']/class",
            "/lab-inventory:inventory/machine[name='rk2']/enabled",
            "/lab-inventory:inventory/machine[name='rk2']/port",
        ]
    );
}

#[test]
fn data_iterator_ancestors() {
    let ctx = create_context();
    let dtree1 = parse_json_data(&ctx, JSON_TREE1);

    assert_eq!(
        dtree1
            .find_path("/lab-inventory:inventory/machine[name='rk1']/class")
            .expect("Failed to lookup data")
            .ancestors()
            .map(|dnode| dnode.path())
            .collect::<Vec<String>>(),
        vec![
            "/lab-inventory:inventory/machine[name='rk1']",
            "/lab-inventory:inventory",
        ]
    );
}

#[test]
fn data_iterator_siblings() {
    let ctx = create_context();
    let dtree1 = parse_json_data(&ctx, JSON_TREE1);

    assert_eq!(
        dtree1
            .find_path("/lab-inventory:inventory/machine[name='rk1']")
            .expect("Failed to lookup data")
            .siblings()
            .map(|dnode| dnode.path())
            .collect::<Vec<String>>(),
        vec!["/lab-inventory:inventory/machine[name='rk2']"]
    );
}

#[test]
fn data_iterator_children() {
    let ctx = create_context();
    let dtree1 = parse_json_data(&ctx, JSON_TREE1);

    assert_eq!(
        dtree1
            .find_path("/lab-inventory:inventory")
            .expect("Failed to lookup data")
            .children()
            .map(|dnode| dnode.path())
            .collect::<Vec<String>>(),
        vec![
            "/lab-inventory:inventory/location",
            "/lab-inventory:inventory/machine[name='rk1']",
            "/lab-inventory:inventory/machine[name='rk2']",
        ]
    );
}

#[test]
fn data_iterator_list_keys() {
    let ctx = create_context();
    let dtree1 = parse_json_data(&ctx, JSON_TREE1);

    assert_eq!(
        dtree1
            .find_path("/lab-inventory:inventory/machine[name='rk1']")
            .expect("Failed to lookup data")
            .list_keys()
            .map(|dnode| dnode.path())
            .collect::<Vec<String>>(),
        vec!["/lab-inventory:inventory/machine[name='rk1']/name"]
    );
}
