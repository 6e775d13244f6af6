#![allow(dead_code)]

use envbind::EnvBind;

#[derive(EnvBind)]
pub struct Config {
    #[env(from = "HOST", from = "")]
    host: String,
}

fn main() {}
