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

//! Output shapes a partition can be projected to.

use crate::items::Items;
use partix_core::num::SolverNumeric;
use partix_model::partition::Partition;

/// The shape a caller wants the answer in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OutputKind {
    /// The items of every bin.
    #[default]
    Partition,
    /// The sum of every bin.
    Sums,
    /// The largest bin sum.
    LargestSum,
    /// The smallest bin sum.
    SmallestSum,
    /// Items and sums of every bin.
    PartitionAndSums,
    /// The bin sums sorted ascending.
    SortedSums,
}

impl OutputKind {
    /// Whether the projection needs to know which item went where.
    #[inline]
    pub fn needs_contents(self) -> bool {
        matches!(self, Self::Partition | Self::PartitionAndSums)
    }
}

impl std::fmt::Display for OutputKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Partition => "Partition",
            Self::Sums => "Sums",
            Self::LargestSum => "LargestSum",
            Self::SmallestSum => "SmallestSum",
            Self::PartitionAndSums => "PartitionAndSums",
            Self::SortedSums => "SortedSums",
        };
        f.write_str(name)
    }
}

/// One item as reported in a partition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionItem<T> {
    /// Position of the item in the caller's input.
    pub index: usize,
    pub name: Option<String>,
    pub value: T,
}

impl<T> std::fmt::Display for PartitionItem<T>
where
    T: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{}", name),
            None => write!(f, "{}", self.value),
        }
    }
}

/// A partition projected to an [`OutputKind`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartitionOutput<T> {
    Partition(Vec<Vec<PartitionItem<T>>>),
    Sums(Vec<T>),
    LargestSum(T),
    SmallestSum(T),
    PartitionAndSums {
        bins: Vec<Vec<PartitionItem<T>>>,
        sums: Vec<T>,
    },
    SortedSums(Vec<T>),
}

impl<T> PartitionOutput<T>
where
    T: SolverNumeric,
{
    /// Projects `partition` of `items` to `kind`.
    ///
    /// Bins without recorded contents are reported empty; callers choose the
    /// representation from `kind.needs_contents()`.
    pub fn project(kind: OutputKind, partition: &Partition<T>, items: &Items<T>) -> Self {
        match kind {
            OutputKind::Partition => Self::Partition(Self::bins_of(partition, items)),
            OutputKind::Sums => Self::Sums(partition.sums().to_vec()),
            OutputKind::LargestSum => Self::LargestSum(partition.largest_sum()),
            OutputKind::SmallestSum => Self::SmallestSum(partition.smallest_sum()),
            OutputKind::PartitionAndSums => Self::PartitionAndSums {
                bins: Self::bins_of(partition, items),
                sums: partition.sums().to_vec(),
            },
            OutputKind::SortedSums => Self::SortedSums(partition.sorted_sums()),
        }
    }

    fn bins_of(partition: &Partition<T>, items: &Items<T>) -> Vec<Vec<PartitionItem<T>>> {
        debug_assert!(
            partition.has_contents(),
            "called `PartitionOutput::project` with a partition without contents"
        );
        let Some(bins) = partition.bins() else {
            return vec![Vec::new(); partition.num_bins()];
        };

        bins.iter()
            .map(|bin| {
                bin.iter()
                    .map(|item| PartitionItem {
                        index: item.get(),
                        name: items.name(item.get()).map(str::to_owned),
                        value: items.values()[item.get()],
                    })
                    .collect()
            })
            .collect()
    }

    /// Returns the bins of a `Partition` or `PartitionAndSums` output.
    #[inline]
    pub fn bins(&self) -> Option<&[Vec<PartitionItem<T>>]> {
        match self {
            Self::Partition(bins) | Self::PartitionAndSums { bins, .. } => Some(bins),
            _ => None,
        }
    }

    /// Returns the sums of a `Sums`, `SortedSums` or `PartitionAndSums` output.
    #[inline]
    pub fn sums(&self) -> Option<&[T]> {
        match self {
            Self::Sums(sums) | Self::SortedSums(sums) | Self::PartitionAndSums { sums, .. } => {
                Some(sums)
            }
            _ => None,
        }
    }
}

fn write_bin<T>(f: &mut std::fmt::Formatter<'_>, bin: &[PartitionItem<T>]) -> std::fmt::Result
where
    T: std::fmt::Display,
{
    write!(f, "[")?;
    for (i, item) in bin.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", item)?;
    }
    write!(f, "]")
}

impl<T> std::fmt::Display for PartitionOutput<T>
where
    T: SolverNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Partition(bins) => {
                for (b, bin) in bins.iter().enumerate() {
                    write!(f, "Bin #{}: ", b)?;
                    write_bin(f, bin)?;
                    writeln!(f)?;
                }
                Ok(())
            }
            Self::PartitionAndSums { bins, sums } => {
                for (b, (bin, sum)) in bins.iter().zip(sums).enumerate() {
                    write!(f, "Bin #{}: ", b)?;
                    write_bin(f, bin)?;
                    writeln!(f, ", sum={}", sum)?;
                }
                Ok(())
            }
            Self::Sums(sums) | Self::SortedSums(sums) => {
                let sums: Vec<String> = sums.iter().map(ToString::to_string).collect();
                write!(f, "[{}]", sums.join(", "))
            }
            Self::LargestSum(sum) | Self::SmallestSum(sum) => write!(f, "{}", sum),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use partix_model::index::ItemIndex;

    fn ii(i: usize) -> ItemIndex {
        ItemIndex::new(i)
    }

    fn fixture() -> (Partition<i64>, Items<i64>) {
        let items = Items::from_named(vec![("a", 4i64), ("b", 1), ("c", 2)]);
        let partition = Partition::new(4, vec![3, 4], Some(vec![vec![ii(1), ii(2)], vec![ii(0)]]));
        (partition, items)
    }

    #[test]
    fn test_needs_contents() {
        assert!(OutputKind::Partition.needs_contents());
        assert!(OutputKind::PartitionAndSums.needs_contents());
        assert!(!OutputKind::Sums.needs_contents());
        assert!(!OutputKind::LargestSum.needs_contents());
        assert_eq!(OutputKind::default(), OutputKind::Partition);
    }

    #[test]
    fn test_projections() {
        let (partition, items) = fixture();
        assert_eq!(
            PartitionOutput::project(OutputKind::LargestSum, &partition, &items),
            PartitionOutput::LargestSum(4)
        );
        assert_eq!(
            PartitionOutput::project(OutputKind::SmallestSum, &partition, &items),
            PartitionOutput::SmallestSum(3)
        );
        assert_eq!(
            PartitionOutput::project(OutputKind::Sums, &partition, &items).sums(),
            Some(&[3, 4][..])
        );

        let output = PartitionOutput::project(OutputKind::PartitionAndSums, &partition, &items);
        let bins = output.bins().unwrap();
        assert_eq!(bins[0][0].name.as_deref(), Some("b"));
        assert_eq!(bins[1][0].value, 4);
        assert_eq!(output.to_string(), "Bin #0: [b, c], sum=3\nBin #1: [a], sum=4\n");
    }

    #[test]
    fn test_sorted_sums_of_positional_partition() {
        let items = Items::from_values(vec![5i64, 1]);
        let partition = Partition::new(-5, vec![5, 1], None);
        let output = PartitionOutput::project(OutputKind::SortedSums, &partition, &items);
        assert_eq!(output, PartitionOutput::SortedSums(vec![1, 5]));
        assert_eq!(output.to_string(), "[1, 5]");
    }

    #[test]
    fn test_anonymous_items_print_values() {
        let items = Items::from_values(vec![4i64, 1, 2]);
        let (partition, _) = fixture();
        let output = PartitionOutput::project(OutputKind::Partition, &partition, &items);
        assert_eq!(output.to_string(), "Bin #0: [1, 2]\nBin #1: [4]\n");
    }
}
