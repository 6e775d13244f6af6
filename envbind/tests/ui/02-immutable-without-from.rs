#![allow(dead_code)]

use envbind::EnvBind;

#[derive(EnvBind, Default)]
#[env(default)]
pub struct Config {
    #[env(immutable)]
    id: u64,
}

fn main() {}
