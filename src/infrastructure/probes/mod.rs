pub mod fs_prober;

pub use fs_prober::FsProber;
