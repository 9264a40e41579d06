//! Identification and coloring of surface nodes and voxels.

use super::MappableDataFile;
use crate::error::{DataFileError, Result};
use cifti_common::Structure;
use serde::Serialize;

/// Text shown for a label key missing from the map's label table.
const INVALID_LABEL_TEXT: &str = "Invalid Label Index";

/// A map value and its display text: the label name for label files, the
/// number for palette files.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IdentifiedValue {
    pub value: f32,
    pub text: String,
}

/// A voxel identified from a coordinate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VoxelIdentification {
    pub ijk: [i64; 3],
    pub value: f32,
    pub text: String,
}

impl MappableDataFile {
    fn identify(&self, map_index: usize, value: f32) -> Result<IdentifiedValue> {
        let text = if self.is_mapped_with_label_table() {
            self.map_label_table(map_index)?
                .and_then(|table| table.label(value as i32))
                .map_or_else(|| INVALID_LABEL_TEXT.to_string(), |label| label.name.clone())
        } else {
            value.to_string()
        };
        Ok(IdentifiedValue { value, text })
    }

    fn check_surface_node_count(&self, structure: Structure, node_count: usize) -> Result<bool> {
        let content = self.loaded()?;
        let Some(access) = self.access() else {
            return Ok(false);
        };
        Ok(content.source.surface_node_count(access, structure) == Some(node_count))
    }

    /// Value of a surface node in a map.
    ///
    /// `None` when the structure's data was mapped to a surface with a
    /// different node count or the node has no data.
    pub fn map_surface_node_value(
        &self,
        map_index: usize,
        structure: Structure,
        node: usize,
        node_count: usize,
    ) -> Result<Option<IdentifiedValue>> {
        self.map_at(map_index)?;
        if !self.check_surface_node_count(structure, node_count)? {
            return Ok(None);
        }

        let content = self.loaded()?;
        let nodes = content
            .source
            .surface_mappings(content.policy.access, structure)
            .map_err(|e| DataFileError::source(self.file_name.clone(), e))?;
        let Some(mapping) = nodes.iter().find(|m| m.node == node) else {
            return Ok(None);
        };

        let data = self.map_data(map_index)?;
        match data.get(mapping.offset) {
            Some(value) => self.identify(map_index, *value).map(Some),
            None => Ok(None),
        }
    }

    /// Copy a map's colors and values onto the nodes of a surface.
    ///
    /// Returns `false`, leaving the buffers untouched, when the node count
    /// does not match or the structure has no data. Otherwise every node is
    /// first set to color (0, 0, 0, -1) and value 0, then nodes with data get
    /// the map's color and value. `rgba_out` holds four floats per node.
    pub fn map_surface_node_coloring(
        &self,
        map_index: usize,
        structure: Structure,
        rgba_out: &mut [f32],
        values_out: &mut [f32],
        node_count: usize,
    ) -> Result<bool> {
        let map = self.map_at(map_index)?;
        if !self.check_surface_node_count(structure, node_count)? {
            return Ok(false);
        }

        let content = self.loaded()?;
        let nodes = content
            .source
            .surface_mappings(content.policy.access, structure)
            .map_err(|e| DataFileError::source(self.file_name.clone(), e))?;
        if nodes.is_empty() {
            return Ok(false);
        }

        for rgba in rgba_out.chunks_exact_mut(4).take(node_count) {
            rgba.copy_from_slice(&[0.0, 0.0, 0.0, -1.0]);
        }
        for value in values_out.iter_mut().take(node_count) {
            *value = 0.0;
        }

        let data = self.map_data(map_index)?;
        let map_rgba = map.rgba();
        for mapping in &nodes {
            let node4 = mapping.node * 4;
            let offset4 = mapping.offset * 4;
            if let (Some(out), Some(color)) = (
                rgba_out.get_mut(node4..node4 + 4),
                map_rgba.get(offset4..offset4 + 4),
            ) {
                out.copy_from_slice(color);
            }
            if let (Some(out), Some(value)) =
                (values_out.get_mut(mapping.node), data.get(mapping.offset))
            {
                *out = *value;
            }
        }

        Ok(true)
    }

    /// Identify the voxel containing a coordinate.
    ///
    /// `None` when the coordinate is outside the volume or the voxel has no data.
    pub fn map_volume_voxel_value(
        &self,
        map_index: usize,
        xyz: [f32; 3],
    ) -> Result<Option<VoxelIdentification>> {
        self.loaded()?;
        self.map_at(map_index)?;

        let Some(ijk) = self.enclosing_voxel(xyz) else {
            return Ok(None);
        };
        if !self.index_valid(ijk) {
            return Ok(None);
        }
        let Some(value) = self.value(ijk, map_index)? else {
            return Ok(None);
        };

        let IdentifiedValue { value, text } = self.identify(map_index, value)?;
        Ok(Some(VoxelIdentification { ijk, value, text }))
    }
}
