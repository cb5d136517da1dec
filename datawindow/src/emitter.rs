/// Helper that funnels computed indexes into a sink while enforcing a strict contract.
///
/// It enforces:
/// - Out-of-bounds indexes are ignored (and debug-asserted).
/// - Duplicates are ignored.
/// - Out-of-order indexes are ignored (and debug-asserted).
///
/// Sampling strategies use it so every reduced series is an ordered subsequence of the input.
pub struct IndexEmitter<'a> {
    len: usize,
    last: Option<usize>,
    emit: &'a mut dyn FnMut(usize),
}

impl<'a> IndexEmitter<'a> {
    pub fn new(len: usize, emit: &'a mut dyn FnMut(usize)) -> Self {
        Self {
            len,
            last: None,
            emit,
        }
    }

    pub fn emit(&mut self, index: usize) {
        if index >= self.len {
            vwarn!(index, len = self.len, "IndexEmitter: out-of-bounds index");
            debug_assert!(
                index < self.len,
                "IndexEmitter: out-of-bounds index (i={index}, len={})",
                self.len
            );
            return;
        }

        if let Some(prev) = self.last {
            if index == prev {
                return;
            }
            if index < prev {
                vwarn!(
                    prev,
                    next = index,
                    "IndexEmitter: indexes must be emitted in ascending order"
                );
                debug_assert!(
                    index > prev,
                    "IndexEmitter: indexes must be emitted in ascending order (prev={prev}, next={index})"
                );
                return;
            }
        }

        self.last = Some(index);
        (self.emit)(index);
    }

    /// Emits both endpoints around `interior`, which must already be sorted ascending.
    pub fn emit_with_endpoints(&mut self, interior: impl IntoIterator<Item = usize>) {
        if self.len == 0 {
            return;
        }
        self.emit(0);
        for i in interior {
            self.emit(i);
        }
        self.emit(self.len - 1);
    }
}
