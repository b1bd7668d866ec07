//! Download URL validation
//!
//! An ordered chain of rules; the first rule with an opinion decides. Validation is
//! advisory and never mutates the resource.

use tracing::debug;
use url::Url;

use crate::domain::EnrichedResource;
use crate::scanner::has_model_extension;

/// Hosts that serve model weights directly
pub const KNOWN_MODEL_HOSTS: &[&str] = &[
    "huggingface.co",
    "hf.co",
    "civitai.com",
    "github.com",
    "githubusercontent.com",
    "modelscope.cn",
];

pub const REASON_TOO_SHORT: &str = "empty or too short";
pub const REASON_SEARCH_QUERY: &str = "search query, not a direct link";
pub const REASON_GENERAL_PAGE: &str = "general page, not a direct link";
pub const REASON_BAD_SCHEME: &str = "not http(s) or a recognized SSH remote";
pub const REASON_NOT_GITHUB: &str = "must be a GitHub repository";
pub const REASON_UNRECOGNIZED: &str = "not a recognized direct link or hosting platform";

/// Validation verdict for one resource
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidationResult<'a> {
    pub resource: &'a EnrichedResource,
    pub is_valid: bool,
    pub reason: Option<&'static str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Verdict {
    Valid,
    Invalid(&'static str),
}

/// A rule returns `None` to pass the decision on to the next rule
type Rule = fn(&EnrichedResource, &str) -> Option<Verdict>;

const RULES: &[Rule] = &[
    too_short,
    search_query,
    general_page,
    scheme,
    custom_node_host,
    model_link,
];

fn starts_with_ignore_case(text: &str, prefix: &str) -> bool {
    text.get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

fn too_short(_: &EnrichedResource, url: &str) -> Option<Verdict> {
    (url.chars().count() < 5).then_some(Verdict::Invalid(REASON_TOO_SHORT))
}

fn search_query(_: &EnrichedResource, url: &str) -> Option<Verdict> {
    starts_with_ignore_case(url, "search:").then_some(Verdict::Invalid(REASON_SEARCH_QUERY))
}

fn general_page(_: &EnrichedResource, url: &str) -> Option<Verdict> {
    starts_with_ignore_case(url, "page:").then_some(Verdict::Invalid(REASON_GENERAL_PAGE))
}

fn scheme(resource: &EnrichedResource, url: &str) -> Option<Verdict> {
    if starts_with_ignore_case(url, "http://") || starts_with_ignore_case(url, "https://") {
        return None;
    }
    let ssh_remote = resource.is_custom_node()
        && starts_with_ignore_case(url, "git@")
        && url.to_lowercase().contains("github.com");
    Some(if ssh_remote {
        Verdict::Valid
    } else {
        Verdict::Invalid(REASON_BAD_SCHEME)
    })
}

fn custom_node_host(resource: &EnrichedResource, url: &str) -> Option<Verdict> {
    if !resource.is_custom_node() {
        return None;
    }
    Some(if url.to_lowercase().contains("github.com") {
        Verdict::Valid
    } else {
        Verdict::Invalid(REASON_NOT_GITHUB)
    })
}

fn model_link(_: &EnrichedResource, url: &str) -> Option<Verdict> {
    let lower = url.to_lowercase();
    let known_host = KNOWN_MODEL_HOSTS.iter().any(|host| lower.contains(host));
    let model_file = Url::parse(url).is_ok_and(|parsed| has_model_extension(parsed.path()));
    (!known_host && !model_file).then_some(Verdict::Invalid(REASON_UNRECOGNIZED))
}

/// Validate one resource's download URL
pub fn validate(resource: &EnrichedResource) -> ValidationResult<'_> {
    let url = resource.download_url.trim();
    let verdict = RULES
        .iter()
        .find_map(|rule| rule(resource, url))
        .unwrap_or(Verdict::Valid);

    debug!(raw_name = resource.raw_name(), ?verdict, "Validated download URL");
    match verdict {
        Verdict::Valid => ValidationResult {
            resource,
            is_valid: true,
            reason: None,
        },
        Verdict::Invalid(reason) => ValidationResult {
            resource,
            is_valid: false,
            reason: Some(reason),
        },
    }
}

/// Validate every resource, in order
pub fn validate_all(resources: &[EnrichedResource]) -> Vec<ValidationResult<'_>> {
    resources.iter().map(validate).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ResourceType, ScannedItem};

    fn resource(resource_type: ResourceType, url: &str) -> EnrichedResource {
        let mut resource = EnrichedResource::unresolved(ScannedItem::new("thing", false));
        resource.resource_type = resource_type;
        resource.download_url = url.to_string();
        resource
    }

    fn reason(resource_type: ResourceType, url: &str) -> Option<&'static str> {
        validate(&resource(resource_type, url)).reason
    }

    #[test]
    fn test_rule_too_short() {
        assert_eq!(reason(ResourceType::Lora, ""), Some(REASON_TOO_SHORT));
        assert_eq!(reason(ResourceType::Lora, "  abc  "), Some(REASON_TOO_SHORT));
    }

    #[test]
    fn test_rule_search_query() {
        let r = resource(ResourceType::Lora, "search: lora for anime style");
        let result = validate(&r);
        assert!(!result.is_valid);
        assert!(result.reason.unwrap().contains("search query"));
        assert_eq!(
            reason(ResourceType::CustomNode, "SEARCH: impact pack"),
            Some(REASON_SEARCH_QUERY)
        );
    }

    #[test]
    fn test_rule_general_page() {
        assert_eq!(
            reason(ResourceType::Checkpoint, "page: civitai model page"),
            Some(REASON_GENERAL_PAGE)
        );
    }

    #[test]
    fn test_rule_ssh_remote() {
        assert_eq!(
            reason(ResourceType::CustomNode, "git@github.com:foo/bar.git"),
            None
        );
        assert_eq!(
            reason(ResourceType::CustomNode, "git@GitHub.com:foo/bar.git"),
            None
        );
        assert_eq!(
            reason(ResourceType::Checkpoint, "git@github.com:foo/bar.git"),
            Some(REASON_BAD_SCHEME)
        );
        assert_eq!(
            reason(ResourceType::CustomNode, "git@gitlab.com:foo/bar.git"),
            Some(REASON_BAD_SCHEME)
        );
        assert_eq!(
            reason(ResourceType::Lora, "ftp://models.example/a.safetensors"),
            Some(REASON_BAD_SCHEME)
        );
    }

    #[test]
    fn test_rule_custom_node_must_be_github() {
        assert_eq!(
            reason(ResourceType::CustomNode, "https://github.com/foo/bar"),
            None
        );
        assert_eq!(
            reason(ResourceType::CustomNode, "https://gitlab.com/foo/bar"),
            Some(REASON_NOT_GITHUB)
        );
        // A model file link is still not a repository
        assert_eq!(
            reason(
                ResourceType::CustomNode,
                "https://huggingface.co/foo/bar/resolve/main/x.safetensors"
            ),
            Some(REASON_NOT_GITHUB)
        );
    }

    #[test]
    fn test_rule_model_link() {
        assert_eq!(
            reason(ResourceType::Checkpoint, "https://example.com/file.zip"),
            Some(REASON_UNRECOGNIZED)
        );
        assert_eq!(
            reason(
                ResourceType::Checkpoint,
                "https://huggingface.co/runwayml/stable-diffusion-v1-5"
            ),
            None
        );
        assert_eq!(
            reason(ResourceType::Lora, "https://civitai.com/api/download/models/87153"),
            None
        );
        assert_eq!(
            reason(ResourceType::Vae, "https://cdn.example.com/vae.safetensors?download=1"),
            None
        );
        assert_eq!(
            reason(ResourceType::Unknown, "HTTPS://Example.com/model.CKPT"),
            None
        );
        assert_eq!(
            reason(ResourceType::Lora, "https://cdn.example.com/get#style.safetensors"),
            Some(REASON_UNRECOGNIZED)
        );
    }

    #[test]
    fn test_validation_does_not_mutate() {
        let r = resource(ResourceType::Lora, "  search: x  ");
        let before = r.clone();
        let _ = validate(&r);
        assert_eq!(r, before);
    }

    #[test]
    fn test_validate_all_keeps_order() {
        let resources = vec![
            resource(ResourceType::Lora, "https://civitai.com/api/download/models/1"),
            resource(ResourceType::Lora, "search: x"),
        ];
        let results = validate_all(&resources);
        assert!(results[0].is_valid);
        assert!(!results[1].is_valid);
        assert_eq!(results[1].resource.download_url, "search: x");
    }
}
