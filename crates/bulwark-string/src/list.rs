// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! ProtectedStringList - one protected buffer per character.
//!
//! Nodes live in an arena and link to their neighbours by index. Every node
//! owns a 4-byte [`SecureBuffer`] with the zero-padded UTF-8 encoding of its
//! code point, and records the encoded width so embedded NUL characters
//! survive.

use zeroize::Zeroizing;

use bulwark_buffer::SecureBuffer;

use crate::error::StringError;
use crate::traits::ProtectedString;
use crate::utf8::decode_char;

const NODE_SIZE: usize = 4;

struct Node {
    buffer: SecureBuffer,
    width: usize,
    prev: Option<usize>,
    next: Option<usize>,
}

/// A secret string stored as a linked list of per-character buffers.
///
/// Comparison and conversion unlock one node at a time: at any instant at most
/// one character of each operand is readable. The price is one secure
/// allocation per character (a full page on the page backend).
#[derive(Default)]
pub struct ProtectedStringList {
    nodes: Vec<Node>,
    head: Option<usize>,
    tail: Option<usize>,
    byte_len: usize,
}

impl ProtectedStringList {
    /// Creates an empty string.
    pub fn new() -> Self {
        Self::default()
    }

    /// Arena slot of the `index`-th character, walking from the nearer end.
    fn slot_of(&self, index: usize) -> Result<usize, StringError> {
        let len = self.nodes.len();
        let out_of_range = StringError::IndexOutOfRange { index, len };

        if index >= len {
            return Err(out_of_range);
        }

        let (mut cursor, steps, forward) = if index < len / 2 {
            (self.head, index, true)
        } else {
            (self.tail, len - 1 - index, false)
        };

        for _ in 0..steps {
            cursor = cursor.and_then(|slot| {
                let node = &self.nodes[slot];
                if forward { node.next } else { node.prev }
            });
        }

        cursor.ok_or(out_of_range)
    }

    fn read_node(node: &mut Node) -> Result<char, StringError> {
        let width = node.width;
        node.buffer.open(|bytes| decode_char(&bytes[..width]))
    }
}

impl ProtectedString for ProtectedStringList {
    fn len(&self) -> usize {
        self.nodes.len()
    }

    fn byte_len(&self) -> usize {
        self.byte_len
    }

    fn append(&mut self, c: char) -> Result<(), StringError> {
        let mut encoded = Zeroizing::new([0u8; NODE_SIZE]);
        let width = c.encode_utf8(&mut encoded[..]).len();

        let buffer = SecureBuffer::from_slice(&encoded[..])?;
        let slot = self.nodes.len();

        self.nodes.push(Node {
            buffer,
            width,
            prev: self.tail,
            next: None,
        });

        match self.tail {
            Some(tail) => self.nodes[tail].next = Some(slot),
            None => self.head = Some(slot),
        }

        self.tail = Some(slot);
        self.byte_len += width;

        Ok(())
    }

    fn get(&mut self, index: usize) -> Result<char, StringError> {
        let slot = self.slot_of(index)?;
        Self::read_node(&mut self.nodes[slot])
    }

    fn pop(&mut self) -> Result<Option<char>, StringError> {
        // Appends and pops both happen at the tail, so the tail is always the
        // last arena slot.
        let Some(mut node) = self.nodes.pop() else {
            return Ok(None);
        };

        match node.prev {
            Some(prev) => self.nodes[prev].next = None,
            None => self.head = None,
        }

        self.tail = node.prev;
        self.byte_len -= node.width;

        let c = Self::read_node(&mut node);
        node.buffer.free();

        c.map(Some)
    }

    fn clear(&mut self) -> Result<(), StringError> {
        for node in self.nodes.iter_mut() {
            node.buffer.free();
        }

        self.nodes.clear();
        self.head = None;
        self.tail = None;
        self.byte_len = 0;

        Ok(())
    }

    fn equals(&mut self, other: &mut Self) -> Result<bool, StringError> {
        if self.nodes.len() != other.nodes.len() {
            return Ok(false);
        }

        let mut equal = true;
        let mut left = self.head;
        let mut right = other.head;

        while let (Some(l), Some(r)) = (left, right) {
            let a = &mut self.nodes[l];
            let b = &mut other.nodes[r];

            // No early exit: every node pair is compared.
            let same_width = a.width == b.width;
            let same_bytes = a.buffer.equals(&mut b.buffer)?;
            equal &= same_width & same_bytes;

            left = a.next;
            right = b.next;
        }

        Ok(equal)
    }

    fn protected_utf8_bytes(&mut self) -> Result<SecureBuffer, StringError> {
        let mut out = SecureBuffer::allocate(self.byte_len)?;
        let mut offset = 0;
        let mut cursor = self.head;

        while let Some(slot) = cursor {
            let node = &mut self.nodes[slot];

            node.buffer.copy_to(0, &mut out, offset, node.width)?;
            offset += node.width;
            cursor = node.next;
        }

        Ok(out)
    }
}

impl core::fmt::Debug for ProtectedStringList {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ProtectedStringList")
            .field("len", &self.nodes.len())
            .field("byte_len", &self.byte_len)
            .finish_non_exhaustive()
    }
}
