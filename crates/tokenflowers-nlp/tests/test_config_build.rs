use std::io::Write;
use tokenflowers_core::{Result, Tensor};
use tokenflowers_nlp::{BuiltEmbedder, TokenEmbedder, TokenEmbedderConfig};

fn write_embedding_file(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_build_mismatched_embedder_from_config() -> Result<()> {
    let file = write_embedding_file("the 1.0 2.0\nquick 3.0 4.0\nfox 5.0 6.0\n");
    let config = TokenEmbedderConfig::from_json(&format!(
        r#"{{
            "type": "pretrained_embedding_mismatched",
            "pretrained_file": {:?},
            "trainable": false
        }}"#,
        file.path()
    ))?;

    let built = config.build::<f32>()?;
    assert_eq!(built.output_dim(), 2);
    assert!(!built.parameters()[0].requires_grad());

    let embedder = match built {
        BuiltEmbedder::Mismatched(e) => e,
        BuiltEmbedder::Matched(_) => panic!("config resolved to the wrong variant"),
    };

    // One original token spanning wordpieces 0..=1.
    let token_ids = Tensor::from_vec(vec![0i64, 1], &[1, 2])?;
    let mask = Tensor::from_vec(vec![true], &[1, 1])?;
    let offsets = Tensor::from_vec(vec![0i64, 1], &[1, 1, 2])?;
    let wordpiece_mask = Tensor::from_vec(vec![true, true], &[1, 2])?;

    let out = embedder.forward(&token_ids, &mask, &offsets, &wordpiece_mask, None, None)?;
    assert_eq!(out.as_slice(), Some(&[2.0, 3.0][..]));
    Ok(())
}

#[test]
fn test_build_matched_embedder_from_config() -> Result<()> {
    let file = write_embedding_file("a 1.0\nb 2.0\n");
    let config = TokenEmbedderConfig::from_json(&format!(
        r#"{{"type": "pretrained_embedding", "pretrained_file": {:?}}}"#,
        file.path()
    ))?;

    let built = config.build::<f32>()?;
    assert_eq!(built.output_dim(), 1);
    assert!(built.parameters()[0].requires_grad());

    match built {
        BuiltEmbedder::Matched(embedder) => {
            let ids = Tensor::from_vec(vec![1i64, 0], &[1, 2])?;
            let mask = Tensor::from_vec(vec![true, true], &[1, 2])?;
            let out = embedder.forward(&ids, &mask, None, None)?;
            assert_eq!(out.as_slice(), Some(&[2.0, 1.0][..]));
        }
        BuiltEmbedder::Mismatched(_) => panic!("config resolved to the wrong variant"),
    }
    Ok(())
}

#[test]
fn test_build_with_encoder_from_config() -> Result<()> {
    let file = write_embedding_file("a 1.0 2.0\n");
    let config = TokenEmbedderConfig::from_json(&format!(
        r#"{{
            "type": "pretrained_embedding_mismatched",
            "pretrained_file": {:?},
            "encoder": {{"type": "feed_forward", "input_dim": 2, "output_dim": 4}}
        }}"#,
        file.path()
    ))?;

    let built = config.build::<f32>()?;
    assert_eq!(built.output_dim(), 4);
    Ok(())
}
