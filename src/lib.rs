//! ymir - multi-stack secret and configuration manager.
//!
//! A project keeps named stacks of property definitions under `.ymir/`.
//! Each property says where its value lives; resolver plugins fetch the
//! values and ymir writes them out as a `.env` file.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── init          # Scaffold .ymir
//! │   ├── stack         # checkout / stack / create / delete
//! │   ├── property      # add / update / remove
//! │   ├── plugin        # plugin install / list / info
//! │   ├── env           # export / import
//! │   └── completions   # Shell completions
//! └── core/
//!     ├── format/       # Stack-file lexer, parser, serializer
//!     ├── property      # Typed sections and the RequiredProps policy
//!     ├── project       # .ymir layout and current_stack
//!     ├── stack/        # Stack loading, edits, lifecycle
//!     ├── plugin/       # Resolver trait, descriptors, subprocess protocol
//!     ├── resolve       # Partition and dispatch across resolvers
//!     ├── dotenv        # .env emission and parsing
//!     ├── export        # Stack to .env
//!     ├── import        # .env to resolver and stack
//!     └── init          # Project scaffolding
//! ```

pub mod cli;
pub mod core;
pub mod error;
