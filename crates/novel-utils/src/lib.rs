// File: novel-utils/src/lib.rs
// Purpose: Browsing-context helpers used from view code

//! # novel-utils
//!
//! Small helpers over the browsing context: the current location, the
//! document, the durable key/value store and the wall clock. Each of those
//! is a trait so view code can run against the real browser or against the
//! in-memory implementations shipped here.
//!
//! ## Quick Start
//!
//! ```
//! use novel_utils::{format_date, parse_query_object, StaticLocation};
//! use chrono::{NaiveDate, NaiveDateTime};
//!
//! let location = StaticLocation::new("https://novel.example/#/book/1?from=rank");
//! let query = parse_query_object(&location, None).unwrap();
//! assert_eq!(query.get("from"), Some(&"rank".to_string()));
//!
//! let date: NaiveDateTime = NaiveDate::from_ymd_opt(2024, 3, 5)
//!     .unwrap()
//!     .and_hms_opt(9, 7, 0)
//!     .unwrap();
//! assert_eq!(format_date("YYYY-mm-dd HH:MM", &date), "2024-03-05 09:07");
//! ```

pub mod anchor;
pub mod context;
pub mod date;
pub mod error;
pub mod query;
pub mod storage;

pub use anchor::scroll_to_anchor;
pub use context::{Clock, Document, FixedClock, Location, MemoryDocument, StaticLocation, SystemClock};
pub use date::{add_days, add_months, add_years, format_date};
pub use error::{Result, UtilError};
pub use query::{parse_query_object, read_query_param, QueryObject};
pub use storage::{get_stored, set_stored, FileStore, KeyValueStore, MemoryStore};
