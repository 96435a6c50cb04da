// Each module exposes `sort` plus a `SortImpl` generated by `sort_impl!`. The comparison order of
// every sort is part of its contract, observers replay it index by index.

pub mod bubble;

pub mod selection;

// Stable.
pub mod insertion;

// Stable, top-down, allocates a copy of both halves per merge.
pub mod merge;

// Lomuto partition with the last element as pivot.
pub mod quick;

pub mod heap;
