#![allow(dead_code)]

use envbind::EnvBind;

#[derive(EnvBind)]
pub struct Config {
    #[env(required = false)]
    port: u16,
}

fn main() {}
