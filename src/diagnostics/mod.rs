// Session diagnostics — uplink and dispatch counters.

pub mod stats;
