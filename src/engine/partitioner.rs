// Partitioner - 入力列を固定数の独立した部分列に分割
// 各部分列は1つのワーカーによって順番に消費される

use crate::core::{PartitionStrategy, PreconditionViolation, WorkItem};

/// 1つのワーカーが順番に消費する部分列
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition<T> {
    id: usize,
    items: Vec<WorkItem<T>>,
}

impl<T> Partition<T> {
    fn new(id: usize) -> Self {
        Self {
            id,
            items: Vec::new(),
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// 元の列でのインデックス（昇順）
    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.items.iter().map(|work| work.index)
    }
}

impl<T> IntoIterator for Partition<T> {
    type Item = WorkItem<T>;
    type IntoIter = std::vec::IntoIter<WorkItem<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

/// 静的パーティション分割
///
/// 全ての項目がちょうど1つのパーティションに割り当てられる（重複も欠落もない）。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Partitioner {
    partitions: usize,
    strategy: PartitionStrategy,
}

impl Partitioner {
    pub fn new(
        partitions: usize,
        strategy: PartitionStrategy,
    ) -> Result<Self, PreconditionViolation> {
        if partitions == 0 {
            return Err(PreconditionViolation::InvalidPartitionCount { partitions });
        }
        Ok(Self {
            partitions,
            strategy,
        })
    }

    pub fn partition_count(&self) -> usize {
        self.partitions
    }

    pub fn strategy(&self) -> PartitionStrategy {
        self.strategy
    }

    /// 入力をちょうど `partition_count()` 個の部分列に分割
    pub fn split<T>(&self, items: impl IntoIterator<Item = T>) -> Vec<Partition<T>> {
        let mut partitions: Vec<Partition<T>> = (0..self.partitions).map(Partition::new).collect();
        let indexed = items
            .into_iter()
            .enumerate()
            .map(|(index, item)| WorkItem::new(index, item));

        match self.strategy {
            PartitionStrategy::RoundRobin => {
                for work in indexed {
                    partitions[work.index % self.partitions].items.push(work);
                }
            }
            PartitionStrategy::Contiguous => {
                // 区間の境界を決めるには件数が必要
                let all: Vec<WorkItem<T>> = indexed.collect();
                let base = all.len() / self.partitions;
                let remainder = all.len() % self.partitions;

                let mut rest = all.into_iter();
                for (id, partition) in partitions.iter_mut().enumerate() {
                    let size = base + usize::from(id < remainder);
                    partition.items.extend(rest.by_ref().take(size));
                }
            }
        }

        partitions
    }
}
