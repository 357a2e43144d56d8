//! Entry point for generating the Swift and Kotlin bindings.

fn main() {
    uniffi::uniffi_bindgen_main();
}
