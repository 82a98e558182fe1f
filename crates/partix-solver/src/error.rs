// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Failures of a partition request.

use partix_dp::error::DpError;
use partix_model::{instance::InstanceError, objective::ObjectiveError};

/// The error type of [`crate::dispatch::PartitionRequest::partition`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartitionError<T> {
    /// The request asks for zero bins.
    ZeroBins,
    /// The items do not form a valid instance.
    Instance(InstanceError<T>),
    /// The objective cannot rank these items in the value type.
    Objective(ObjectiveError<T>),
    /// The dynamic programming search gave up.
    Dp(DpError),
    /// The objective is tied to a different number of bins.
    WeightCountMismatch { weights: usize, bins: usize },
    /// A copy count was given for a different number of items.
    CopiesCountMismatch { items: usize, copies: usize },
}

impl<T> std::fmt::Display for PartitionError<T>
where
    T: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ZeroBins => write!(f, "At least one bin is required"),
            Self::Instance(err) => write!(f, "Invalid items: {}", err),
            Self::Objective(err) => write!(f, "Unusable objective: {}", err),
            Self::Dp(err) => write!(f, "Dynamic programming failed: {}", err),
            Self::WeightCountMismatch { weights, bins } => write!(
                f,
                "The objective has {} weights but {} bins were requested",
                weights, bins
            ),
            Self::CopiesCountMismatch { items, copies } => write!(
                f,
                "{} copy counts were given for {} items",
                copies, items
            ),
        }
    }
}

impl<T> std::error::Error for PartitionError<T>
where
    T: std::fmt::Debug + std::fmt::Display + 'static,
{
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Instance(err) => Some(err),
            Self::Objective(err) => Some(err),
            Self::Dp(err) => Some(err),
            _ => None,
        }
    }
}

impl<T> From<InstanceError<T>> for PartitionError<T> {
    fn from(err: InstanceError<T>) -> Self {
        Self::Instance(err)
    }
}

impl<T> From<ObjectiveError<T>> for PartitionError<T> {
    fn from(err: ObjectiveError<T>) -> Self {
        Self::Objective(err)
    }
}

impl<T> From<DpError> for PartitionError<T> {
    fn from(err: DpError) -> Self {
        Self::Dp(err)
    }
}
