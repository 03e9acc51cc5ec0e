// Input snapshots and the output entities produced from them

pub mod company;
pub mod snapshot;

pub use company::{Company, Founders, Jobs, LaunchPost, SocialMedia};
pub use snapshot::RawSnapshot;
