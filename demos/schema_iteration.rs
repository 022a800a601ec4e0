use yangkit::context::{Context, ContextFlags};
use yangkit::schema::SchemaPathFormat;

static SEARCH_DIR: &str = "./assets/yang/";
static MODULE_NAME: &str = "lab-inventory";

fn main() -> std::io::Result<()> {
    // Initialize context.
    let mut ctx =
        Context::with_searchdir(SEARCH_DIR, ContextFlags::NO_YANGLIBRARY)
            .expect("Failed to create context");

    // Load the test module.
    let module = ctx
        .load_module(MODULE_NAME, None, &["power-control"])
        .expect("Failed to load module");

    // Iterate over all schema nodes of the module.
    println!("Iterating over all schema nodes...");
    for snode in module.traverse() {
        println!("  {} ({:?})", snode.path(SchemaPathFormat::LOG), snode.kind());
    }

    Ok(())
}
