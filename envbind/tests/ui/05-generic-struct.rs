#![allow(dead_code)]

use envbind::EnvBind;

#[derive(EnvBind)]
pub struct Config<T> {
    #[env(from)]
    value: T,
}

fn main() {}
