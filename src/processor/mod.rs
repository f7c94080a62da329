//! Processors for every supported value type.
//!
//! Each value type comes as a family of up to four factory functions, one per
//! processing mode (see [`mode`]). Leaves check a single value; composites
//! (`object`, `array`, `tuple`, `record`) run child processors and collect
//! every child issue under the child's path.
//!
//! # Example
//!
//! ```rust
//! use intake::{as_number, is_array, is_object, is_string, Contract, Processor};
//! use serde_json::json;
//!
//! let order = is_object(
//!     Contract::new()
//!         .field("id", is_string().min_length(1))
//!         .field("quantities", is_array(as_number().min(1.0))),
//! );
//!
//! let output = order
//!     .process_root(&json!({ "id": "A-1", "quantities": ["2", 3] }))
//!     .into_result()
//!     .unwrap();
//! assert_eq!(output["quantities"], json!([2, 3]));
//! ```

mod any;
mod array;
mod boolean;
mod date;
mod enumeration;
mod format;
pub mod mode;
mod nullable;
mod numeric;
mod object;
mod options;
mod pipeline;
mod record;
mod stages;
mod string;
mod traits;
mod tuple;
mod ulid;
mod url;

pub use any::{is_any, unchecked, AnyKind, AnyProcessor, Unchecked};
pub use array::{as_array, is_array, maybe_array, maybe_as_array, ArrayKind, ArrayProcessor};
pub use boolean::{
    as_boolean, is_boolean, maybe_as_boolean, maybe_boolean, BooleanKind, BooleanProcessor,
};
pub use date::{as_date, is_date, maybe_as_date, maybe_date, DateKind, DateProcessor};
pub use enumeration::{as_enum, is_enum, maybe_as_enum, maybe_enum, EnumKind, EnumProcessor};
pub use format::StringFormat;
pub use mode::{As, Converting, Is, Maybe, MaybeAs, Mode, Optional};
pub use nullable::{null_or, null_or_as, NullOr};
pub use numeric::{
    as_number, is_number, maybe_as_number, maybe_number, NumberKind, NumberProcessor,
};
pub use object::{
    as_object, is_object, maybe_as_object, maybe_object, Contract, ObjectKind, ObjectProcessor,
};
pub use pipeline::Pipeline;
pub use record::{
    as_record, is_record, maybe_as_record, maybe_record, RecordKind, RecordProcessor,
};
pub use string::{
    as_string, is_string, maybe_as_string, maybe_string, StringKind, StringProcessor, Trim,
};
pub use traits::{Kind, Processor, ValueProcessor};
pub use tuple::{as_tuple, is_tuple, maybe_as_tuple, maybe_tuple, TupleKind, TupleProcessor};
pub use ulid::{is_ulid, maybe_ulid, UlidKind, UlidProcessor};
pub use self::url::{as_url, is_url, maybe_as_url, maybe_url, UrlKind, UrlProcessor};
