// Application layer: concrete launchers built on the domain port.

pub mod launchers;
