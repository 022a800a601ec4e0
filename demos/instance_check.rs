use yangkit::context::{Context, ContextFlags};
use yangkit::data::{
    DataFormat, DataParserFlags, DataTree, DataValidationFlags,
};
use yangkit::schema::SchemaInputFormat;

static SEARCH_DIR: &str = "./assets/yang/";
static MODULE_FILE: &str = "./assets/yang/sensor-grid.yin";
static DATA_FILE: &str = "./assets/data/sensor-grid.xml";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize context.
    let mut ctx =
        Context::with_searchdir(SEARCH_DIR, ContextFlags::NO_YANGLIBRARY)?;

    // Parse the schema module in the YIN format.
    let module =
        ctx.parse_module_path(MODULE_FILE, SchemaInputFormat::YIN, &[])?;
    println!("{}", module.name());

    // Parse the instance document in the XML format.
    let dtree = DataTree::parse_path(
        &ctx,
        DATA_FILE,
        DataFormat::XML,
        DataParserFlags::empty(),
        DataValidationFlags::empty(),
    )?;

    // Walk from the top data node back to its schema definition and print
    // the name of the first child.
    let top = dtree.reference().expect("Empty data tree");
    let child = top
        .schema()
        .children()
        .next()
        .expect("Missing child schema node");
    println!("{}", child.name());

    Ok(())
}
