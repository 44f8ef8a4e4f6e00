use std::io::{ self, Seek, SeekFrom };

/// The reference point a seek offset is measured from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Anchor {
    Start,
    Current,
    End,
}

/// One seek instruction, applied relative to its anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldOffset {
    pub amount: i64,
    pub anchor: Anchor,
}

impl FieldOffset {
    pub fn new(amount: i64, anchor: Anchor) -> Self {
        Self { amount, anchor }
    }
}

impl TryFrom<FieldOffset> for SeekFrom {
    type Error = io::Error;

    fn try_from(offset: FieldOffset) -> io::Result<SeekFrom> {
        match offset.anchor {
            Anchor::Start => u64::try_from(offset.amount)
                .map(SeekFrom::Start)
                .map_err(|_| {
                    io::Error::new(
                        io::ErrorKind::InvalidInput,
                        format!("negative offset {} from stream start", offset.amount),
                    )
                }),
            Anchor::Current => Ok(SeekFrom::Current(offset.amount)),
            Anchor::End => Ok(SeekFrom::End(offset.amount)),
        }
    }
}

/// Resolved instructions for decoding one field.
///
/// An ignored plan has every other member empty. `length` is absent when the
/// field's natural length applies. `offsets` are applied in order before the
/// field is read. `element` is present only for container fields and
/// describes how each contained item is read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ReadPlan {
    pub ignore: bool,
    pub length: Option<i64>,
    pub offsets: Vec<FieldOffset>,
    pub func_name: Option<String>,
    pub element: Option<Box<ReadPlan>>,
}

impl ReadPlan {
    /// A plan that skips the field.
    pub fn ignored() -> Self {
        Self { ignore: true, ..Self::default() }
    }

    pub fn is_ignored(&self) -> bool { self.ignore }

    pub fn element(&self) -> Option<&ReadPlan> { self.element.as_deref() }

    /// The plan's offsets as seek instructions, in application order.
    pub fn seek_positions(&self) -> impl Iterator<Item = io::Result<SeekFrom>> + '_ {
        self.offsets.iter().map(|offset| SeekFrom::try_from(*offset))
    }

    /// Seeks `stream` through every offset in order and returns the final
    /// position.
    ///
    /// # Example
    ///
    /// ```rust
    /// # use std::io::Cursor;
    /// # use bintag_parse::{ Anchor, FieldOffset, ReadPlan };
    /// let plan = ReadPlan {
    ///     offsets: vec![
    ///         FieldOffset::new(4, Anchor::Start),
    ///         FieldOffset::new(2, Anchor::Current),
    ///     ],
    ///     ..ReadPlan::default()
    /// };
    /// let mut stream = Cursor::new(vec![0u8; 16]);
    /// assert_eq!(plan.apply_offsets(&mut stream).unwrap(), 6);
    /// ```
    pub fn apply_offsets<S: Seek + ?Sized>(&self, stream: &mut S) -> io::Result<u64> {
        let mut position = None;
        for seek in self.seek_positions() {
            position = Some(stream.seek(seek?)?);
        }
        match position {
            Some(position) => Ok(position),
            None => stream.stream_position(),
        }
    }
}
