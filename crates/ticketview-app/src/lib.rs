// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod model;
pub mod paging;
pub mod source;
pub mod status;
pub mod table;
pub mod timestamp;

pub use model::*;
pub use paging::*;
pub use source::*;
pub use status::*;
pub use table::*;
pub use timestamp::*;
