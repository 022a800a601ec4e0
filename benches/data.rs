use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use yangkit::context::{Context, ContextFlags};
use yangkit::data::{Data, DataDiffFlags, DataTree};

static SEARCH_DIR: &str = "./assets/yang/";

fn data_generate(ctx: &Context, machines: u32) -> DataTree<'_> {
    let mut dtree = DataTree::new(ctx);

    for i in 1..=machines {
        let changes = [
            (
                format!("/lab-inventory:inventory/machine[name='rk{}']", i),
                None,
            ),
            (
                format!(
                    "/lab-inventory:inventory/machine[name='rk{}']/class",
                    i
                ),
                Some("server"),
            ),
            (
                format!(
                    "/lab-inventory:inventory/machine[name='rk{}']/enabled",
                    i
                ),
                Some("true"),
            ),
        ];

        for (xpath, value) in &changes {
            dtree
                .new_path(xpath, *value, false)
                .expect("Failed to edit data tree");
        }
    }

    dtree
}

fn criterion_benchmark(c: &mut Criterion) {
    let tree_sizes = [1 * 1024, 4 * 1024, 16 * 1024];

    // Initialize context.
    let mut ctx =
        Context::with_searchdir(SEARCH_DIR, ContextFlags::NO_YANGLIBRARY)
            .expect("Failed to create context");

    // Load the test module.
    ctx.load_module("lab-inventory", None, &[])
        .expect("Failed to load module");

    // Prepare DataTree.diff() benchmark.
    let mut group = c.benchmark_group("DataTree.diff() / tree size");
    for size in &tree_sizes {
        // Create artificial data trees.
        let dtree = data_generate(&ctx, *size);
        let dtree_base = data_generate(&ctx, *size + 1024);

        // Run benchmark.
        group.bench_with_input(
            BenchmarkId::from_parameter(size),
            size,
            |b, _| {
                b.iter(|| {
                    dtree
                        .diff(&dtree_base, DataDiffFlags::empty())
                        .expect("Failed to compare data trees");
                });
            },
        );
    }
    group.finish();

    // Prepare DataTree.find_xpath() benchmark.
    let mut group = c.benchmark_group("DataTree.find_xpath() / tree size");
    for size in &tree_sizes {
        // Create artificial data tree.
        let dtree = data_generate(&ctx, *size);
        let xpath = format!(
            "/lab-inventory:inventory/machine[name='rk{}']",
            size
        );

        // Run benchmark.
        group.bench_with_input(
            BenchmarkId::from_parameter(size),
            size,
            |b, _| {
                b.iter(|| {
                    dtree
                        .find_xpath(&xpath)
                        .expect("Failed to find machine")
                        .count()
                });
            },
        );
    }
    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
