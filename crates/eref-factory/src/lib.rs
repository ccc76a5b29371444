//! Ref factories for eref.
//!
//! A [`RefFactory`] closes over one tag and a payload constructor. Every ref
//! it mints carries exactly that tag, whichever construction path produced
//! it: the main constructor, [`RefFactory::from_data`], or a named auxiliary
//! constructor registered on the [`RefFactoryBuilder`].
//!
//! # Quick Start
//!
//! ```rust
//! use eref_factory::RefFactory;
//!
//! #[derive(Debug, Clone, PartialEq)]
//! struct UserKey {
//!     id: u64,
//!     name: String,
//! }
//!
//! let users = RefFactory::builder("user", |(id, name): (u64, String)| UserKey { id, name })
//!     .aux("guest", |_: ()| UserKey { id: 0, name: "guest".into() })
//!     .build();
//!
//! let alice = users.create((1, "alice".into()));
//! assert_eq!(*alice.tag(), "user");
//! assert!(users.is(&alice));
//!
//! let guest = users.call("guest", ()).unwrap();
//! assert_eq!(guest.data().id, 0);
//! ```

pub mod error;
pub mod factory;

pub use error::{FactoryError, FactoryResult};
pub use factory::{Constructor, RefFactory, RefFactoryBuilder};
