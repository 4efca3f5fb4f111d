//! Injectable allocation hooks and the heap-allocated machine handle.
//!
//! The engine consumes exactly two allocation hooks, bundled in the
//! [`Allocator`] trait and replaceable by the host environment (test
//! doubles, arena allocators). [`System`] is the default and forwards to
//! the platform allocator. [`FsmBox`] is the heap lifecycle of a machine:
//! construction requests one `Fsm`-sized block from the hooks, drop
//! releases it through the same hooks.

use std::alloc::{alloc, dealloc, Layout};
use std::ops::{Deref, DerefMut};
use std::ptr::{self, NonNull};

use crate::core::{Fsm, TransitionTable, INVALID_STATE};

/// Allocation hooks the engine draws from.
///
/// Implementations are assumed non-blocking and thread-safe per the
/// platform's allocator guarantees; the engine imposes no additional
/// discipline on them.
pub trait Allocator: Send + Sync {
    /// Request a block for `layout`. `None` signals no memory.
    fn allocate(&self, layout: Layout) -> Option<NonNull<u8>>;

    /// Release a block previously returned by [`allocate`](Self::allocate).
    ///
    /// # Safety
    ///
    /// `ptr` must have been returned by `allocate` on this same allocator
    /// with this same `layout`, and must not be released twice.
    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout);
}

/// The platform allocator.
#[derive(Clone, Copy, Debug, Default)]
pub struct System;

impl Allocator for System {
    fn allocate(&self, layout: Layout) -> Option<NonNull<u8>> {
        if layout.size() == 0 {
            return None;
        }
        // Safety: layout has non-zero size.
        NonNull::new(unsafe { alloc(layout) })
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        // Safety: caller guarantees ptr/layout came from our allocate.
        unsafe { dealloc(ptr.as_ptr(), layout) }
    }
}

impl<A: Allocator + ?Sized> Allocator for &A {
    fn allocate(&self, layout: Layout) -> Option<NonNull<u8>> {
        (**self).allocate(layout)
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        // Safety: forwarded contract.
        unsafe { (**self).deallocate(ptr, layout) }
    }
}

/// A machine allocated through an [`Allocator`], released through the same
/// allocator on drop.
///
/// Construction performs the cheap structural sanity checks before touching
/// the allocator at all, and releases the block again if the deeper table
/// validation fails after allocation. All causes of failure collapse to
/// `None`; the caller treats absence uniformly.
///
/// Dereferences to [`Fsm`], so the whole engine API is available on the
/// boxed handle.
///
/// # Example
///
/// ```rust
/// use ratchet::{FireOutcome, FsmBox, Transition, TransitionTable};
///
/// let table = TransitionTable::new(vec![
///     Transition::new(0, 1).when(|fsm: &ratchet::Fsm| fsm.current_state() == 0),
///     Transition::new(1, 0),
/// ]);
///
/// let mut fsm = FsmBox::new(&table).expect("valid table");
/// assert_eq!(fsm.fire(), FireOutcome::Transitioned);
/// assert_eq!(fsm.current_state(), 1);
/// // dropping releases the block through the allocator that produced it
/// ```
pub struct FsmBox<'t, A: Allocator = System> {
    ptr: NonNull<Fsm<'t>>,
    alloc: A,
}

impl<'t> FsmBox<'t, System> {
    /// Heap-allocate a machine over `table` with the platform allocator.
    pub fn new(table: &'t TransitionTable) -> Option<Self> {
        Self::new_in(table, System)
    }
}

impl<'t, A: Allocator> FsmBox<'t, A> {
    /// Heap-allocate a machine over `table`, drawing from `alloc`.
    ///
    /// Fails without allocating when the table is empty, when the first
    /// entry has no guard, or when the first entry's destination is the
    /// reserved invalid state. Fails after releasing the one allocated
    /// block when the table is longer than
    /// [`MAX_TRANSITIONS`](crate::MAX_TRANSITIONS).
    pub fn new_in(table: &'t TransitionTable, alloc: A) -> Option<Self> {
        let first = table.transitions().first()?;
        if first.guard_ref().is_none() || first.destination() == INVALID_STATE {
            return None;
        }

        let layout = Layout::new::<Fsm<'t>>();
        let ptr = alloc.allocate(layout)?.cast::<Fsm<'t>>();

        let Some(fsm) = Fsm::new(table) else {
            // Safety: ptr came from alloc with this layout, released once.
            unsafe { alloc.deallocate(ptr.cast(), layout) };
            return None;
        };

        // Safety: ptr is valid for writes of one properly-aligned Fsm.
        unsafe { ptr.as_ptr().write(fsm) };
        Some(FsmBox { ptr, alloc })
    }
}

impl<'t, A: Allocator> Deref for FsmBox<'t, A> {
    type Target = Fsm<'t>;

    fn deref(&self) -> &Fsm<'t> {
        // Safety: ptr holds an initialized Fsm for the life of the box.
        unsafe { self.ptr.as_ref() }
    }
}

impl<'t, A: Allocator> DerefMut for FsmBox<'t, A> {
    fn deref_mut(&mut self) -> &mut Fsm<'t> {
        // Safety: ptr holds an initialized Fsm, exclusively borrowed here.
        unsafe { self.ptr.as_mut() }
    }
}

impl<'t, A: Allocator> Drop for FsmBox<'t, A> {
    fn drop(&mut self) {
        let layout = Layout::new::<Fsm<'t>>();
        // Safety: ptr holds an initialized Fsm allocated from self.alloc
        // with this layout; after this the box is gone.
        unsafe {
            ptr::drop_in_place(self.ptr.as_ptr());
            self.alloc.deallocate(self.ptr.cast(), layout);
        }
    }
}

impl<A: Allocator> std::fmt::Debug for FsmBox<'_, A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(&**self, f)
    }
}
