fn main() {
    // No-op on host builds; for device builds this re-exports the ESP-IDF
    // environment captured by the last `cargo build --target ...-espidf`.
    embuild::espidf::sysenv::output();
}
