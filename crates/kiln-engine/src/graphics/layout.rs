use std::ops::Index;

use super::backend::ScalarType;

/// One named vertex attribute.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub name: String,
    pub scalar: ScalarType,
    pub components: u32,
    pub normalized: bool,
    offset: usize,
}

impl Attribute {
    pub fn new(name: impl Into<String>, scalar: ScalarType, components: u32) -> Self {
        Self {
            name: name.into(),
            scalar,
            components,
            normalized: false,
            offset: 0,
        }
    }

    pub fn normalized(mut self, normalized: bool) -> Self {
        self.normalized = normalized;
        self
    }

    /// Byte offset inside one vertex. Assigned by the owning layout.
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    #[inline]
    pub fn byte_size(&self) -> usize {
        self.components as usize * self.scalar.byte_size()
    }
}

/// Interleaved vertex layout.
///
/// Each attribute's offset is the sum of the sizes before it; the stride is
/// the total size.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeLayout {
    attributes: Vec<Attribute>,
    stride: usize,
}

impl AttributeLayout {
    pub fn new(attributes: impl IntoIterator<Item = Attribute>) -> Self {
        let mut layout = Self::default();
        for attr in attributes {
            layout.push(attr);
        }
        layout
    }

    pub fn push(&mut self, mut attribute: Attribute) {
        attribute.offset = self.stride;
        self.stride += attribute.byte_size();
        self.attributes.push(attribute);
    }

    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Attribute> {
        self.attributes.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Attribute> {
        self.attributes.iter()
    }
}

impl Index<usize> for AttributeLayout {
    type Output = Attribute;

    fn index(&self, index: usize) -> &Attribute {
        &self.attributes[index]
    }
}
