// Copyright 2020 Google LLC
//
// Use of this source code is governed by an MIT-style license that can be found
// in the LICENSE file or at https://opensource.org/licenses/MIT.

//! Finding entries of a remote resource tree with a predicate expression
//! language modeled after `find(1)`.

pub mod client;
pub mod find;
pub mod opts;
pub mod path;
