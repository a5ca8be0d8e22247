//! A set calculator over unbalanced binary search trees.
//!
//! The heart of this crate is [`BstSet`], an ordered set of unique elements
//! stored in a plain (never rebalanced) binary search tree:
//!
//! - [`insert`](BstSet::insert) / [`contains`](BstSet::contains) - descend by comparison
//! - [`iter`](BstSet::iter) / [`render`](BstSet::render) - ascending, restartable traversal
//! - [`deep_copy`](BstSet::deep_copy) - node-for-node copy with the same shape
//! - [`union_with`](BstSet::union_with) / [`intersect_with`](BstSet::intersect_with) - in-place set algebra
//! - [`apply`](BstSet::apply) - map a fallible function over the elements in order
//!
//! # Example
//!
//! ```
//! use bst_calc::BstSet;
//!
//! let mut x = BstSet::from([1, 2]);
//! let y = BstSet::from([2, 3]);
//!
//! x.union_with(&y);
//! assert_eq!(x.render(), "1 2 3\n");
//! assert_eq!(y.render(), "2 3\n");
//!
//! let doubled = x.apply(|v| Ok::<_, ()>(v * 2)).unwrap();
//! assert_eq!(doubled, [2, 4, 6]);
//! ```
//!
//! The [`calculator`] module is the interactive shell built on top of it: three
//! sets named X, Y and Z, a line-oriented command language and a small integer
//! expression language for the `l` (apply lambda) command. The `set-calc`
//! binary runs it against stdin or a script file.
//!
//! # Implementation
//!
//! Each set owns an arena of nodes linked by integer handles rather than
//! pointers, and every tree walk is an explicit loop. A tree built from sorted
//! input degenerates into a list of the same depth as its length; that is
//! accepted, and it neither overflows the stack on traversal nor on drop.

// These forbid rules and lint groups are meant to be very restrictive.
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod raw;

pub mod bst_set;
pub mod calculator;

pub use bst_set::BstSet;
pub use calculator::{CalcError, Calculator, Command, Flow, Repl, ReplOptions};
