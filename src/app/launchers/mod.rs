pub mod cinder_cleanup;
pub mod vm_balance;

pub use cinder_cleanup::CinderCleanupLauncher;
pub use vm_balance::VmBalanceLauncher;
