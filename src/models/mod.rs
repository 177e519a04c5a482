//! Placement domain models.
//!
//! Provides the data types for describing placement problems and their
//! solutions. Resource names are open-ended: a problem chooses which
//! names its cost model considers.
//!
//! # Domain Mappings
//!
//! | u-placement | Kubernetes | Batch cluster | VM fleet |
//! |-------------|------------|---------------|----------|
//! | Pod | Pod | Job | VM |
//! | Node | Node | Worker host | Hypervisor |
//! | Resources | Requests / Allocatable | Slots | vCPU / RAM |
//! | Assignment | Binding | Placement | Host map |

mod assignment;
mod problem;
mod resource;

pub use assignment::{Assignment, UNPLACED};
pub use problem::{Node, Pod, Problem};
pub use resource::Resources;
