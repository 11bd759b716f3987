use std::fmt::{self, Debug};

use tracing::{debug, trace};

use crate::coin::{Coin, FairCoin};
use crate::error;
use crate::options::Options;

type NodeId = usize;

enum Slot<K, V> {
    Head,
    Ground { key: K, values: Vec<V> },
    // Promoted copy of a level-0 entry; compares through its ground id.
    Replica { ground: NodeId },
}

struct SkipNode<K, V> {
    slot: Slot<K, V>,
    previous: Option<NodeId>,
    next: Option<NodeId>,
    up: Option<NodeId>,
    down: Option<NodeId>,
}

impl<K, V> SkipNode<K, V> {
    fn new(slot: Slot<K, V>) -> Self {
        Self {
            slot,
            previous: None,
            next: None,
            up: None,
            down: None,
        }
    }
}

/// An insert-only ordered multimap. Level 0 links every distinct key in
/// ascending order, each holding the values inserted under it; every higher
/// level links a random subset of the level below.
///
/// Nodes live in one arena and refer to each other by index, so the whole
/// structure is released at once when the list is dropped.
pub struct SkipList<K, V, C = FairCoin> {
    nodes: Vec<SkipNode<K, V>>,
    // Sentinel of each level, bottom to top.
    heads: Vec<NodeId>,
    len: usize,
    max_height: Option<usize>,
    coin: C,
    // Reservations allowed before the next one fails.
    #[cfg(test)]
    reserve_budget: Option<usize>,
}

impl<K: Ord, V> SkipList<K, V> {
    pub fn new() -> Self {
        Self::with_options(Options::default())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::with_options(Options::default().seed(seed))
    }

    pub fn with_options(options: Options) -> Self {
        let coin = match options.seed {
            Some(seed) => FairCoin::seeded(seed),
            None => FairCoin::from_entropy(),
        };
        let mut list = Self::with_coin(coin);
        list.max_height = options.max_height;
        list
    }
}

impl<K: Ord, V> Default for SkipList<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, C> SkipList<K, V, C> {
    /// Number of physical nodes: every level a key reaches counts once.
    /// Sentinels are not counted.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of levels, zero before the first insert.
    pub fn height(&self) -> usize {
        self.heads.len()
    }

    fn key(&self, id: NodeId) -> Option<&K> {
        match &self.nodes[id].slot {
            Slot::Head => None,
            Slot::Ground { key, .. } => Some(key),
            Slot::Replica { ground } => self.key(*ground),
        }
    }

    fn reserve(&mut self, nodes: usize, heads: usize) -> error::Result<()> {
        #[cfg(test)]
        {
            if let Some(budget) = self.reserve_budget.as_mut() {
                if *budget == 0 {
                    return Err(tests::exhausted());
                }
                *budget -= 1;
            }
        }
        self.nodes.try_reserve(nodes)?;
        self.heads.try_reserve(heads)?;
        Ok(())
    }

    // Callers reserve arena space first.
    fn push(&mut self, node: SkipNode<K, V>) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(node);
        id
    }

    fn splice_after(&mut self, at: NodeId, node: NodeId) {
        let next = self.nodes[at].next;
        self.nodes[node].previous = Some(at);
        self.nodes[node].next = next;
        if let Some(next) = next {
            self.nodes[next].previous = Some(node);
        }
        self.nodes[at].next = Some(node);
    }

    // Needs one free arena slot and one free heads slot.
    fn grow(&mut self) -> NodeId {
        let head = self.push(SkipNode::new(Slot::Head));
        if let Some(&top) = self.heads.last() {
            self.nodes[top].up = Some(head);
            self.nodes[head].down = Some(top);
        }
        self.heads.push(head);
        debug!(height = self.heads.len(), "skip list grew a level");
        head
    }
}

impl<K: Ord, V, C: Coin> SkipList<K, V, C> {
    pub fn with_coin(coin: C) -> Self {
        Self {
            nodes: Vec::new(),
            heads: Vec::new(),
            len: 0,
            max_height: None,
            coin,
            #[cfg(test)]
            reserve_budget: None,
        }
    }

    /// Appends `value` to the bucket of `key`, creating the key if needed.
    ///
    /// # Panics
    ///
    /// Panics if node storage cannot be allocated. The panic carries the
    /// allocation error; nothing else makes an insert fail.
    pub fn insert(&mut self, key: K, value: V) {
        if let Err(err) = self.try_insert(key, value) {
            panic!("skip list insert: {}", err);
        }
    }

    /// Like [`insert`](Self::insert), but reports allocation failure instead
    /// of panicking.
    ///
    /// An `Err` means `value` was not stored and the list is unchanged apart
    /// from possibly an empty level 0, so the call can be retried. Once the
    /// value is stored the call returns `Ok`: if a replica cannot be
    /// allocated, promotion stops there, as if the coin had landed tails.
    pub fn try_insert(&mut self, key: K, value: V) -> error::Result<()> {
        let top = match self.heads.last() {
            Some(&top) => top,
            None => {
                self.reserve(1, 1)?;
                self.grow()
            }
        };

        let (prev, mut anchors) = self.locate(top, &key)?;

        if let Some(next) = self.nodes[prev].next {
            if let Slot::Ground { key: found, values } = &mut self.nodes[next].slot {
                if *found == key {
                    values.try_reserve(1)?;
                    values.push(value);
                    trace!(bucket = values.len(), "appended to existing key");
                    return Ok(());
                }
            }
        }

        let mut values = Vec::new();
        values.try_reserve(1)?;
        values.push(value);
        self.reserve(1, 0)?;
        let ground = self.push(SkipNode::new(Slot::Ground { key, values }));
        self.splice_after(prev, ground);
        self.len += 1;

        let height = self.promote(ground, &mut anchors);
        trace!(height, "inserted new key");
        Ok(())
    }

    // Walks down from `top` to the last level-0 node ordered before `key`.
    // Anchors are collected top to bottom, one per level above level 0.
    fn locate(&self, top: NodeId, key: &K) -> error::Result<(NodeId, Vec<NodeId>)> {
        let mut anchors = Vec::new();
        anchors.try_reserve(self.heads.len() - 1)?;
        let mut current = top;
        loop {
            current = self.advance(current, key);
            match self.nodes[current].down {
                Some(down) => {
                    anchors.push(current);
                    current = down;
                }
                None => return Ok((current, anchors)),
            }
        }
    }

    fn advance(&self, mut current: NodeId, key: &K) -> NodeId {
        while let Some(next) = self.nodes[current].next {
            match self.key(next) {
                Some(k) if k < key => current = next,
                _ => break,
            }
        }
        current
    }

    // Flips the coin until tails, stacking one replica per heads. A failed
    // reservation ends the tower like tails. Returns the tower height.
    fn promote(&mut self, ground: NodeId, anchors: &mut Vec<NodeId>) -> usize {
        let mut below = ground;
        let mut height = 1;
        while self.max_height.map_or(true, |max| height < max) && self.coin.flip() {
            let reserved = if anchors.is_empty() {
                self.reserve(2, 1)
            } else {
                self.reserve(1, 0)
            };
            if let Err(err) = reserved {
                debug!(height, %err, "promotion stopped early");
                break;
            }
            let anchor = match anchors.pop() {
                Some(anchor) => anchor,
                None => self.grow(),
            };

            let replica = self.push(SkipNode::new(Slot::Replica { ground }));
            self.nodes[below].up = Some(replica);
            self.nodes[replica].down = Some(below);
            self.splice_after(anchor, replica);
            self.len += 1;

            below = replica;
            height += 1;
        }
        height
    }
}

impl<K: Debug, V, C> Debug for SkipList<K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (l, &head) in self.heads.iter().enumerate().rev() {
            let mut curr = self.nodes[head].next;
            if curr.is_none() {
                continue;
            }
            write!(f, "{}:", l)?;
            while let Some(id) = curr {
                if let Some(key) = self.key(id) {
                    write!(f, " {:?}", key)?;
                }
                curr = self.nodes[id].next;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
