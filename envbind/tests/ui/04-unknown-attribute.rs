#![allow(dead_code)]

use envbind::EnvBind;

#[derive(EnvBind)]
pub struct Config {
    #[env(from, retries = 3)]
    port: u16,
}

fn main() {}
