//! Core node policy
//!
//! Decides which node types ship with the host application and therefore never need
//! installing. The built-in list is necessarily incomplete, so the scanner takes the
//! policy as a parameter and callers can extend or replace it.

use std::collections::HashSet;

/// Node types that are always available in a stock installation
const BUILTIN_CORE_NODES: &[&str] = &[
    // Sampling
    "KSampler",
    "KSamplerAdvanced",
    "SamplerCustom",
    "SamplerCustomAdvanced",
    "KSamplerSelect",
    "BasicScheduler",
    "BasicGuider",
    "CFGGuider",
    "RandomNoise",
    // Loaders
    "CheckpointLoaderSimple",
    "CheckpointLoader",
    "unCLIPCheckpointLoader",
    "ImageOnlyCheckpointLoader",
    "DiffusersLoader",
    "VAELoader",
    "LoraLoader",
    "LoraLoaderModelOnly",
    "CLIPLoader",
    "DualCLIPLoader",
    "TripleCLIPLoader",
    "UNETLoader",
    "ControlNetLoader",
    "DiffControlNetLoader",
    "UpscaleModelLoader",
    "CLIPVisionLoader",
    "StyleModelLoader",
    "GLIGENLoader",
    "HypernetworkLoader",
    "PhotoMakerLoader",
    "LoadImage",
    "LoadImageMask",
    "LoadLatent",
    // Conditioning
    "CLIPTextEncode",
    "CLIPTextEncodeSDXL",
    "CLIPTextEncodeSDXLRefiner",
    "CLIPSetLastLayer",
    "CLIPVisionEncode",
    "ConditioningCombine",
    "ConditioningAverage",
    "ConditioningConcat",
    "ConditioningSetArea",
    "ConditioningSetMask",
    "ConditioningZeroOut",
    "ControlNetApply",
    "ControlNetApplyAdvanced",
    "StyleModelApply",
    "unCLIPConditioning",
    "FluxGuidance",
    // Latent
    "EmptyLatentImage",
    "EmptySD3LatentImage",
    "LatentUpscale",
    "LatentUpscaleBy",
    "LatentComposite",
    "LatentBlend",
    "LatentFromBatch",
    "RepeatLatentBatch",
    "SetLatentNoiseMask",
    "VAEDecode",
    "VAEEncode",
    "VAEEncodeForInpaint",
    "VAEDecodeTiled",
    "VAEEncodeTiled",
    // Image
    "SaveImage",
    "PreviewImage",
    "ImageScale",
    "ImageScaleBy",
    "ImageUpscaleWithModel",
    "ImageInvert",
    "ImageBatch",
    "ImagePadForOutpaint",
    "ImageCrop",
    "ImageBlend",
    "ImageBlur",
    "ImageSharpen",
    "ImageToMask",
    "MaskToImage",
    "SolidMask",
    "InvertMask",
    "CropMask",
    "GrowMask",
    "FeatherMask",
    // Model patches
    "ModelSamplingDiscrete",
    "ModelSamplingSD3",
    "ModelSamplingFlux",
    "ModelMergeSimple",
    "FreeU",
    "FreeU_V2",
    "HyperTile",
    "PatchModelAddDownscale",
    "RescaleCFG",
    // Frontend-only helpers
    "Reroute",
    "Note",
    "MarkdownNote",
    "PrimitiveNode",
];

/// Loose prefixes treated as built-in families
const BUILTIN_CORE_PREFIXES: &[&str] = &[
    "KSampler",
    "CLIP",
    "VAE",
    "Load",
    "Save",
    "Preview",
    "Empty",
    "Latent",
    "Conditioning",
];

/// Policy deciding whether a node type is core (excluded from extraction)
pub trait CoreNodePolicy {
    fn is_core(&self, node_type: &str) -> bool;
}

impl<F> CoreNodePolicy for F
where
    F: Fn(&str) -> bool,
{
    fn is_core(&self, node_type: &str) -> bool {
        self(node_type)
    }
}

/// Denylist plus prefix heuristic
#[derive(Debug, Clone, Default)]
pub struct CoreNodeList {
    nodes: HashSet<String>,
    prefixes: Vec<String>,
}

impl CoreNodeList {
    /// Empty policy: nothing is core
    pub fn empty() -> Self {
        Self::default()
    }

    /// The built-in denylist and prefixes
    pub fn builtin() -> Self {
        Self::empty()
            .with_nodes(BUILTIN_CORE_NODES.iter().copied())
            .with_prefixes(BUILTIN_CORE_PREFIXES.iter().copied())
    }

    /// Add exact node types to the denylist
    #[must_use]
    pub fn with_nodes<I, S>(mut self, nodes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.nodes.extend(nodes.into_iter().map(Into::into));
        self
    }

    /// Add prefixes to the heuristic
    #[must_use]
    pub fn with_prefixes<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.prefixes.extend(prefixes.into_iter().map(Into::into));
        self
    }
}

impl CoreNodePolicy for CoreNodeList {
    fn is_core(&self, node_type: &str) -> bool {
        self.nodes.contains(node_type)
            || self
                .prefixes
                .iter()
                .any(|prefix| node_type.starts_with(prefix.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_denylist() {
        let policy = CoreNodeList::builtin();
        assert!(policy.is_core("CheckpointLoaderSimple"));
        assert!(policy.is_core("KSampler"));
        assert!(policy.is_core("Reroute"));
        assert!(!policy.is_core("IPAdapterApply"));
        assert!(!policy.is_core("ADE_AnimateDiffLoaderWithContext"));
    }

    #[test]
    fn test_prefix_heuristic() {
        let policy = CoreNodeList::builtin();
        assert!(policy.is_core("LoadImageFromUrl"));
        assert!(policy.is_core("LatentSomethingNew"));
        assert!(policy.is_core("SaveAnimatedWEBP"));
    }

    #[test]
    fn test_extension() {
        let policy = CoreNodeList::builtin().with_nodes(["UltimateSDUpscale"]);
        assert!(policy.is_core("UltimateSDUpscale"));

        let policy = CoreNodeList::empty().with_prefixes(["Impact"]);
        assert!(policy.is_core("ImpactWildcardProcessor"));
        assert!(!policy.is_core("KSampler"));
    }

    #[test]
    fn test_closure_policy() {
        let policy = |node_type: &str| node_type.ends_with("Core");
        assert!(policy.is_core("MyCore"));
        assert!(!policy.is_core("MyCustom"));
    }
}
