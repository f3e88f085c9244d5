#![deny(warnings, rust_2018_idioms)]
#![forbid(unsafe_code)]

fn main() -> anyhow::Result<()> {
    backend_policy_crdgen::Args::parse_and_run()
}
