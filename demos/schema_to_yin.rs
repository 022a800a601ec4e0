use yangkit::context::{Context, ContextFlags};
use yangkit::schema::{SchemaOutputFormat, SchemaPrinterFlags};

static SEARCH_DIR: &str = "./assets/yang/";
static MODULE_NAME: &str = "lab-inventory";

fn main() -> std::io::Result<()> {
    // Initialize context.
    let mut ctx =
        Context::with_searchdir(SEARCH_DIR, ContextFlags::NO_YANGLIBRARY)
            .expect("Failed to create context");

    // Load the test module.
    let module = ctx
        .load_module(MODULE_NAME, None, &[])
        .expect("Failed to load module");

    // Convert the module from the YANG format to the YIN format.
    module
        .print_file(
            std::io::stdout(),
            SchemaOutputFormat::YIN,
            SchemaPrinterFlags::empty(),
        )
        .expect("Failed to print module");

    Ok(())
}
