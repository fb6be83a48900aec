use moltree_descriptor::compile::BuildCtx;

fn main() {
	let ctx = BuildCtx::new();
	ctx.compile_asset("assets/moltree.json", "moltree.bin");
}
