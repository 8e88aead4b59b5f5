const PRETTY_LOG_VAR: &str = "FOLIO_LOG_PRETTY";

fn main() {
    println!("cargo::rustc-check-cfg=cfg(tracing_pretty)");
    println!("cargo::rerun-if-env-changed={PRETTY_LOG_VAR}");
    if let Ok("1" | "true") = std::env::var(PRETTY_LOG_VAR).as_deref() {
        println!("cargo::rustc-cfg=tracing_pretty");
    }
}
