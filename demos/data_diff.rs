use yangkit::context::{Context, ContextFlags};
use yangkit::data::{
    DataDiffFlags, DataFormat, DataParserFlags, DataTree,
    DataValidationFlags,
};

static SEARCH_DIR: &str = "./assets/yang/";

static JSON_BEFORE: &str = r###"
    {
        "lab-inventory:inventory": {
            "machine": [
                {
                    "name": "rk1",
                    "class": "server",
                    "enabled": true
                }
            ]
        }
    }"###;

static JSON_AFTER: &str = r###"
    {
        "lab-inventory:inventory": {
            "machine": [
                {
                    "name": "rk1",
                    "class": "server",
                    "enabled": false
                },
                {
                    "name": "rk2",
                    "class": "switch",
                    "enabled": true
                }
            ]
        }
    }"###;

fn main() -> std::io::Result<()> {
    // Initialize context.
    let mut ctx =
        Context::with_searchdir(SEARCH_DIR, ContextFlags::NO_YANGLIBRARY)
            .expect("Failed to create context");

    // Load the test module.
    ctx.load_module("lab-inventory", None, &[])
        .expect("Failed to load module");

    // Parse data trees.
    let dtree_before = DataTree::parse_string(
        &ctx,
        JSON_BEFORE,
        DataFormat::JSON,
        DataParserFlags::NO_VALIDATION,
        DataValidationFlags::empty(),
    )
    .expect("Failed to parse data tree");
    let dtree_after = DataTree::parse_string(
        &ctx,
        JSON_AFTER,
        DataFormat::JSON,
        DataParserFlags::NO_VALIDATION,
        DataValidationFlags::empty(),
    )
    .expect("Failed to parse data tree");

    // Compare data trees.
    let diff = dtree_before
        .diff(&dtree_after, DataDiffFlags::empty())
        .expect("Failed to compare data trees");

    println!("Data tree changes:");
    for (op, dnode) in diff.iter() {
        println!("  {:?}: {}", op, dnode.path());
    }

    Ok(())
}
