#[cfg(not(target_arch = "wasm32"))]
fn main() {
    eprintln!("motion-portfolio renders in the browser. Run `trunk serve` or `trunk build --release`.");
}

#[cfg(target_arch = "wasm32")]
fn main() {
    motion_portfolio::frontend::run();
}
