use shadow_rs::ShadowBuilder;

fn main() {
    // Embedded migrations must be re-read when a new one is added
    println!("cargo:rerun-if-changed=migrations");

    ShadowBuilder::builder()
        .build()
        .expect("Failed to generate build metadata");
}
