//! # Sepet Demo Entry Point
//!
//! ```text
//! $ echo '{"type":"add_to_cart","product_id":1}' | sepet-demo [config.toml]
//! {"ok":true,"view":{...}}
//! ```
//!
//! The setup lives in lib.rs so it can be tested.

use std::path::PathBuf;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let config_path = std::env::args().nth(1).map(PathBuf::from);
    sepet_demo_lib::run(config_path).await
}
