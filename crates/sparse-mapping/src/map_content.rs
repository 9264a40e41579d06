//! Per-map state: coloring buffer, statistics and descriptive attributes.

use crate::config::MappingConfig;
use cifti_common::{IndexType, LabelTable, MetaData, PaletteColorMapping, PaletteSource};
use coloring::{color_indices_with_label_table, color_scalars_with_palette};
use statistics::{DescriptiveStatistics, FastStatistics, Histogram, RangeFilter};
use tracing::{debug, warn};

/// One map of a mappable data file.
///
/// The RGBA buffer always holds `data_count * 4` floats. Map values are not
/// kept here; every operation that needs them takes them as an argument.
#[derive(Debug, Clone)]
pub struct MapContent {
    data_type: IndexType,
    data_count: usize,
    name: String,
    metadata: MetaData,
    label_table: Option<LabelTable>,
    palette_color_mapping: Option<PaletteColorMapping>,
    rgba: Vec<f32>,
    descriptive_statistics: DescriptiveStatistics,
    fast_statistics: FastStatistics,
    histogram: Histogram,
}

impl MapContent {
    pub fn new(
        data_type: IndexType,
        data_count: usize,
        metadata: MetaData,
        palette_color_mapping: Option<PaletteColorMapping>,
        label_table: Option<LabelTable>,
        config: &MappingConfig,
    ) -> Self {
        let mut metadata = metadata;
        metadata.ensure_unique_id();

        Self {
            data_type,
            data_count,
            name: String::new(),
            metadata,
            label_table,
            palette_color_mapping,
            rgba: vec![0.0; data_count * 4],
            descriptive_statistics: DescriptiveStatistics::new(),
            fast_statistics: FastStatistics::new(config.fast_statistics_buckets),
            histogram: Histogram::new(config.histogram_buckets),
        }
    }

    /// Recolor the map from its values.
    ///
    /// With a palette source the values are colored with the palette named
    /// by the map's palette color mapping; otherwise they are treated as
    /// label keys. Colors past the end of `values` are cleared. Empty
    /// `values` leave the buffer untouched.
    pub fn update_coloring(&mut self, values: &[f32], palette_source: Option<&dyn PaletteSource>) {
        if values.is_empty() {
            return;
        }

        let count = values.len().min(self.data_count);
        let values = &values[..count];
        if let Some(tail) = self.rgba.get_mut(count * 4..) {
            tail.fill(0.0);
        }

        match palette_source {
            Some(palettes) => {
                let Some(mapping) = self.palette_color_mapping.as_ref() else {
                    warn!(map = %self.name, "Map has no palette color mapping, coloring cleared");
                    self.rgba.fill(0.0);
                    return;
                };
                let palette_name = mapping.selected_palette_name();
                match palettes.palette_by_name(palette_name) {
                    Some(palette) => {
                        self.fast_statistics.update(values);
                        color_scalars_with_palette(
                            &self.fast_statistics,
                            mapping,
                            palette,
                            values,
                            values,
                            &mut self.rgba,
                        );
                    }
                    None => {
                        warn!(
                            map = %self.name,
                            palette = palette_name,
                            "Palette not found, coloring cleared"
                        );
                        self.rgba.fill(0.0);
                    }
                }
            }
            None => {
                color_indices_with_label_table(self.label_table.as_ref(), values, &mut self.rgba);
            }
        }
        debug_assert_eq!(self.rgba.len(), self.data_count * 4);

        debug!(
            map = %self.name,
            mean = self.fast_statistics.mean(),
            min = self.fast_statistics.min(),
            max = self.fast_statistics.max(),
            "Map coloring updated"
        );
    }

    /// Exact statistics of `values`.
    pub fn descriptive_statistics(&mut self, values: &[f32]) -> &DescriptiveStatistics {
        self.descriptive_statistics.update(values);
        &self.descriptive_statistics
    }

    pub fn descriptive_statistics_in_range(
        &mut self,
        values: &[f32],
        filter: &RangeFilter,
    ) -> &DescriptiveStatistics {
        self.descriptive_statistics.update_in_range(values, filter);
        &self.descriptive_statistics
    }

    /// Approximate statistics of `values`.
    pub fn fast_statistics(&mut self, values: &[f32]) -> &FastStatistics {
        self.fast_statistics.update(values);
        &self.fast_statistics
    }

    pub fn fast_statistics_in_range(
        &mut self,
        values: &[f32],
        filter: &RangeFilter,
    ) -> &FastStatistics {
        self.fast_statistics.update_in_range(values, filter);
        &self.fast_statistics
    }

    pub fn histogram(&mut self, values: &[f32]) -> &Histogram {
        self.histogram.update(values);
        &self.histogram
    }

    pub fn histogram_in_range(&mut self, values: &[f32], filter: &RangeFilter) -> &Histogram {
        self.histogram.update_in_range(values, filter);
        &self.histogram
    }

    /// True if the label table, metadata or palette color mapping was edited.
    pub fn is_modified_status(&self) -> bool {
        self.label_table.as_ref().is_some_and(LabelTable::is_modified)
            || self.metadata.is_modified()
            || self
                .palette_color_mapping
                .as_ref()
                .is_some_and(PaletteColorMapping::is_modified)
    }

    pub fn clear_modified_status(&mut self) {
        if let Some(table) = self.label_table.as_mut() {
            table.clear_modified();
        }
        self.metadata.clear_modified();
        if let Some(mapping) = self.palette_color_mapping.as_mut() {
            mapping.clear_modified();
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rename the map. Marks the metadata modified when the name changes.
    pub fn set_name(&mut self, name: impl Into<String>) {
        let name = name.into();
        if name != self.name {
            self.name = name;
            self.metadata.set_modified();
        }
    }

    /// Set the name read from the container without marking anything modified.
    pub(crate) fn with_name(mut self, name: String) -> Self {
        self.name = name;
        self
    }

    pub fn metadata(&self) -> &MetaData {
        &self.metadata
    }

    pub fn metadata_mut(&mut self) -> &mut MetaData {
        &mut self.metadata
    }

    pub fn unique_id(&self) -> &str {
        self.metadata.unique_id().unwrap_or_default()
    }

    /// RGBA colors, four floats per value.
    pub fn rgba(&self) -> &[f32] {
        &self.rgba
    }

    pub fn data_count(&self) -> usize {
        self.data_count
    }

    pub fn data_type(&self) -> IndexType {
        self.data_type
    }

    pub fn label_table(&self) -> Option<&LabelTable> {
        self.label_table.as_ref()
    }

    pub fn label_table_mut(&mut self) -> Option<&mut LabelTable> {
        self.label_table.as_mut()
    }

    pub fn palette_color_mapping(&self) -> Option<&PaletteColorMapping> {
        self.palette_color_mapping.as_ref()
    }

    pub fn palette_color_mapping_mut(&mut self) -> Option<&mut PaletteColorMapping> {
        self.palette_color_mapping.as_mut()
    }
}
