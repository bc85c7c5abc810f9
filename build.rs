fn main() {
    // ESP-IDF link arguments are only needed for the firmware binary;
    // host builds (tests, simulation) skip the sysenv probe entirely.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
