use std::fs::File;
use yangkit::context::{Context, ContextFlags};
use yangkit::data::{
    Data, DataFormat, DataParserFlags, DataTree, DataValidationFlags,
};

static SEARCH_DIR: &str = "./assets/yang/";
static DATA_FILE: &str = "./assets/data/lab-inventory.json";

fn main() -> std::io::Result<()> {
    // Initialize context.
    let mut ctx =
        Context::with_searchdir(SEARCH_DIR, ContextFlags::NO_YANGLIBRARY)
            .expect("Failed to create context");

    // Load the test module.
    ctx.load_module("lab-inventory", None, &["power-control"])
        .expect("Failed to load module");

    // Parse the data tree in the JSON format.
    let dtree = DataTree::parse_file(
        &ctx,
        File::open(DATA_FILE)?,
        DataFormat::JSON,
        DataParserFlags::NO_VALIDATION,
        DataValidationFlags::empty(),
    )
    .expect("Failed to parse data tree");

    // Iterate over all nodes of the data tree.
    println!("Iterating over all data nodes...");
    for dnode in dtree.traverse() {
        println!("  {}: {:?}", dnode.path(), dnode.value());
    }

    // Iterate over the machines present in the data tree.
    println!("Iterating over machines only...");
    for dnode in dtree
        .find_xpath("/lab-inventory:inventory/machine")
        .expect("Failed to find machines")
    {
        println!("  {}", dnode.path());
    }

    Ok(())
}
