/// Ports module defining interfaces for hexagonal architecture
///
/// The application core drives every external system through the outbound
/// ports; the CLI calls the use cases directly.
pub mod outbound;
