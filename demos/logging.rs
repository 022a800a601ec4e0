use log::LevelFilter;
use yangkit::context::{Context, ContextFlags};

static SEARCH_DIR: &str = "./assets/yang/";

fn main() {
    env_logger::Builder::new()
        .filter_level(LevelFilter::max())
        .init();

    let mut ctx = Context::new(ContextFlags::NO_YANGLIBRARY).unwrap();
    ctx.set_log_level_debug();
    ctx.init_default_logger().unwrap();
    ctx.set_searchdir(SEARCH_DIR).unwrap();

    // Loading a module should produce some logs.
    let _module = ctx.load_module("lab-inventory", None, &[]).unwrap();
}
