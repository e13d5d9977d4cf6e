// src/core/commands/xset/mod.rs

//! The finite-sorted-set command family.

pub mod helpers;
pub mod prune_logic;
pub mod xadd;
pub mod xcard;
pub mod xcount;
pub mod xgetoptions;
pub mod xincrby;
pub mod xlexcount;
pub mod xrange;
pub mod xrangebylex;
pub mod xrangebyscore;
pub mod xrank;
pub mod xrem;
pub mod xremrange;
pub mod xscore;
pub mod xsetoptions;

pub use xadd::XAdd;
pub use xcard::XCard;
pub use xcount::XCount;
pub use xgetoptions::{XGetFinity, XGetPruning};
pub use xincrby::XIncrBy;
pub use xlexcount::XLexCount;
pub use xrange::{XRange, XRevRange};
pub use xrangebylex::{XRangeByLex, XRevRangeByLex};
pub use xrangebyscore::{XRangeByScore, XRevRangeByScore};
pub use xrank::{XRank, XRevRank};
pub use xrem::XRem;
pub use xremrange::{XRemRangeByLex, XRemRangeByRank, XRemRangeByScore};
pub use xscore::XScore;
pub use xsetoptions::XSetOptions;
