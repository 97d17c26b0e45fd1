//! The primitive store.
//!
//! A [`Drawing`] owns the ordered primitive sequence, the layer table, the
//! document configuration and a shared handle to the macro library. After a
//! parse the sequence is sorted by layer, so the primitives of one layer are
//! contiguous and a scoped pass can stop once it walks past its layer.

use std::collections::BTreeSet;
use std::sync::Arc;

use schemkit_core::constants::MAX_LAYERS;
use schemkit_core::{DocumentConfig, ThreadSafeRw};
use tracing::debug;

use crate::layers::{standard_layer_name, standard_layers, LayerDescriptor};
use crate::library::MacroLibrary;
use crate::model::tokens::format_number;
use crate::model::Primitive;

/// A drawing shared between an editing thread and renderers.
pub type SharedDrawing = ThreadSafeRw<Drawing>;

#[derive(Debug, Clone)]
pub struct Drawing {
    primitives: Vec<Primitive>,
    layers: Vec<LayerDescriptor>,
    library: Arc<MacroLibrary>,
    config: DocumentConfig,
    layers_in_use: [bool; MAX_LAYERS],
    max_layer: Option<usize>,
}

impl Default for Drawing {
    fn default() -> Self {
        Self::new()
    }
}

impl Drawing {
    /// Creates an empty drawing with the standard layers and no library.
    pub fn new() -> Self {
        Self::with_library(Arc::new(MacroLibrary::new()))
    }

    pub fn with_library(library: Arc<MacroLibrary>) -> Self {
        Self {
            primitives: Vec::new(),
            layers: standard_layers(),
            library,
            config: DocumentConfig::default(),
            layers_in_use: [false; MAX_LAYERS],
            max_layer: None,
        }
    }

    pub fn library(&self) -> &Arc<MacroLibrary> {
        &self.library
    }

    /// Replaces the library used by later parses. Macros already present
    /// keep their expansion.
    pub fn set_library(&mut self, library: Arc<MacroLibrary>) {
        self.library = library;
    }

    pub fn config(&self) -> &DocumentConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut DocumentConfig {
        &mut self.config
    }

    pub fn layers(&self) -> &[LayerDescriptor] {
        &self.layers
    }

    pub fn layer_mut(&mut self, index: usize) -> Option<&mut LayerDescriptor> {
        self.layers.get_mut(index)
    }

    pub fn set_layers(&mut self, layers: Vec<LayerDescriptor>) {
        self.layers = layers;
    }

    pub fn is_layer_visible(&self, index: usize) -> bool {
        self.layers.get(index).is_some_and(|l| l.visible)
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn get(&self, index: usize) -> Option<&Primitive> {
        self.primitives.get(index)
    }

    /// Mutable access to one primitive. Call [`Drawing::sort_by_layer`]
    /// after changing its layer.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Primitive> {
        self.primitives.get_mut(index)
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Primitive> {
        self.primitives.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    /// Appends a primitive without re-sorting and returns its index.
    pub fn insert(&mut self, primitive: Primitive) -> usize {
        for layer in primitive.layers() {
            self.mark_in_use(layer);
        }
        self.primitives.push(primitive);
        self.primitives.len() - 1
    }

    /// Appends a primitive, optionally restoring the layer order.
    pub fn add_primitive(&mut self, primitive: Primitive, sort: bool) {
        self.insert(primitive);
        if sort {
            self.sort_by_layer();
        }
    }

    /// Removes every selected primitive. Returns how many were removed.
    pub fn remove_selected(&mut self) -> usize {
        let before = self.primitives.len();
        self.primitives.retain(|p| !p.selected);
        let removed = before - self.primitives.len();
        if removed > 0 {
            self.scan_layers();
        }
        removed
    }

    /// Removes every primitive; layers and configuration are kept.
    pub fn clear(&mut self) {
        self.primitives.clear();
        self.scan_layers();
    }

    /// Returns to a fresh document: no primitives, standard layers and
    /// default configuration. The library is kept.
    pub fn reset(&mut self) {
        self.primitives.clear();
        self.layers = standard_layers();
        self.config = DocumentConfig::default();
        self.scan_layers();
    }

    /// Stable sort by ascending layer, then rescan the layers in use.
    pub fn sort_by_layer(&mut self) {
        self.primitives.sort_by_key(|p| p.layer);
        self.scan_layers();
        debug!(
            "Sorted {} primitives, max layer {:?}",
            self.primitives.len(),
            self.max_layer
        );
    }

    /// True when the sequence is in layer order.
    pub fn is_sorted_by_layer(&self) -> bool {
        self.primitives.windows(2).all(|w| w[0].layer <= w[1].layer)
    }

    /// Primitives whose own layer is `layer`, relying on the sorted order.
    pub fn primitives_on_layer(&self, layer: usize) -> impl Iterator<Item = &Primitive> {
        let start = self.primitives.partition_point(|p| p.layer < layer);
        self.primitives[start..]
            .iter()
            .take_while(move |p| p.layer == layer)
    }

    /// Exact set of layers with at least one primitive on them.
    pub fn layers_in_use(&self) -> BTreeSet<usize> {
        (0..MAX_LAYERS).filter(|l| self.layers_in_use[*l]).collect()
    }

    pub fn is_layer_in_use(&self, layer: usize) -> bool {
        self.layers_in_use.get(layer).copied().unwrap_or(false)
    }

    pub fn max_layer(&self) -> Option<usize> {
        self.max_layer
    }

    fn mark_in_use(&mut self, layer: usize) {
        if let Some(slot) = self.layers_in_use.get_mut(layer) {
            *slot = true;
            self.max_layer = Some(self.max_layer.map_or(layer, |m| m.max(layer)));
        }
    }

    fn scan_layers(&mut self) {
        self.layers_in_use = [false; MAX_LAYERS];
        self.max_layer = None;
        let used: Vec<usize> = self
            .primitives
            .iter()
            .flat_map(|p| p.layers())
            .collect();
        for layer in used {
            self.mark_in_use(layer);
        }
    }

    /// Configuration header lines, written only when they differ from the
    /// defaults and only with extensions enabled.
    pub fn header(&self, extensions: bool) -> String {
        let mut out = String::new();
        if !extensions {
            return out;
        }
        if self.config.connection_diameter_modified() {
            out.push_str(&format!(
                "FJC C {}\n",
                format_number(self.config.connection_diameter)
            ));
        }
        for (i, layer) in self.layers.iter().enumerate() {
            if !layer.modified {
                continue;
            }
            out.push_str(&format!(
                "FJC L {} {} {}\n",
                i,
                layer.color.to_argb(),
                layer.alpha
            ));
            if standard_layer_name(i) != Some(layer.description.as_str()) {
                out.push_str(&format!("FJC N {} {}\n", i, layer.description));
            }
        }
        if self.config.line_width_modified() {
            out.push_str(&format!(
                "FJC A {}\n",
                format_number(self.config.line_width)
            ));
        }
        if self.config.line_width_circles_modified() {
            out.push_str(&format!(
                "FJC B {}\n",
                format_number(self.config.line_width_circles)
            ));
        }
        out
    }

    /// Full text form: header, then every primitive in current order.
    pub fn serialize(&self, extensions: bool) -> String {
        let mut out = self.header(extensions);
        for p in &self.primitives {
            out.push_str(&p.write(extensions, &self.config));
        }
        out
    }
}
