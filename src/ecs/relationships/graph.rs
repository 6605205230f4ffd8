use std::collections::BTreeMap;

use bevy_ecs::entity::Entity;
use bevy_ecs::resource::Resource;

/// Kind of romantic relation a pair holds. A pair may hold both.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RelationKind {
    Spouse,
    Lover,
}

/// Metadata for a graph relation.
///
/// `started_rel_tick` is relative to the world start tick, the way the host
/// records relation ages; add the world start tick to get the absolute
/// anniversary anchor.
#[derive(Debug, Clone)]
pub struct RelationMeta {
    pub started_rel_tick: i64,
    pub ended: Option<i64>,
}

impl RelationMeta {
    pub fn new(started_rel_tick: i64) -> Self {
        Self {
            started_rel_tick,
            ended: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.ended.is_none()
    }
}

/// Symmetric person-to-person relations that don't map to Bevy structural
/// relationships.
///
/// Keyed by canonical entity pairs (min entity first). BTreeMap for
/// deterministic iteration.
#[derive(Resource, Debug, Clone, Default)]
pub struct RelationGraph {
    pub spouses: BTreeMap<(Entity, Entity), RelationMeta>,
    pub lovers: BTreeMap<(Entity, Entity), RelationMeta>,
}

impl RelationGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the canonical pair ordering (smaller entity first).
    pub fn canonical_pair(a: Entity, b: Entity) -> (Entity, Entity) {
        if a <= b { (a, b) } else { (b, a) }
    }

    fn table(&self, kind: RelationKind) -> &BTreeMap<(Entity, Entity), RelationMeta> {
        match kind {
            RelationKind::Spouse => &self.spouses,
            RelationKind::Lover => &self.lovers,
        }
    }

    fn table_mut(&mut self, kind: RelationKind) -> &mut BTreeMap<(Entity, Entity), RelationMeta> {
        match kind {
            RelationKind::Spouse => &mut self.spouses,
            RelationKind::Lover => &mut self.lovers,
        }
    }

    /// Record a relation between `a` and `b` starting at a world-relative tick.
    pub fn add(&mut self, kind: RelationKind, a: Entity, b: Entity, started_rel_tick: i64) {
        let pair = Self::canonical_pair(a, b);
        self.table_mut(kind)
            .insert(pair, RelationMeta::new(started_rel_tick));
    }

    /// Mark a relation ended at an absolute tick. Ended relations are kept
    /// for history but never match anniversaries again.
    pub fn end(&mut self, kind: RelationKind, a: Entity, b: Entity, ended_tick: i64) {
        let pair = Self::canonical_pair(a, b);
        if let Some(meta) = self.table_mut(kind).get_mut(&pair) {
            meta.ended = Some(ended_tick);
        }
    }

    pub fn are_spouses(&self, a: Entity, b: Entity) -> bool {
        let pair = Self::canonical_pair(a, b);
        self.spouses.get(&pair).is_some_and(|m| m.is_active())
    }

    pub fn are_lovers(&self, a: Entity, b: Entity) -> bool {
        let pair = Self::canonical_pair(a, b);
        self.lovers.get(&pair).is_some_and(|m| m.is_active())
    }

    /// Active partners of `who` for `kind`, with relation start ticks, in
    /// canonical key order.
    pub fn partners_of(&self, who: Entity, kind: RelationKind) -> Vec<(Entity, i64)> {
        self.table(kind)
            .iter()
            .filter(|(_, meta)| meta.is_active())
            .filter_map(|(&(a, b), meta)| {
                if a == who {
                    Some((b, meta.started_rel_tick))
                } else if b == who {
                    Some((a, meta.started_rel_tick))
                } else {
                    None
                }
            })
            .collect()
    }
}
