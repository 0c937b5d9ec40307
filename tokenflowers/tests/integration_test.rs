use std::io::Write;
use tokenflowers::prelude::*;

#[test]
fn test_tensor_creation() {
    let tensor = Tensor::<f32>::zeros(&[2, 3]);
    assert_eq!(tensor.shape().dims(), &[2, 3]);
    assert_eq!(tensor.size(), 6);
}

#[test]
fn test_span_select_through_facade() -> Result<()> {
    let sequence = Tensor::from_vec(vec![1.0f32, 2.0, 3.0], &[1, 3, 1])?;
    let spans = Tensor::from_vec(vec![0i64, 1], &[1, 1, 2])?;

    let (values, mask) = batched_span_select(&sequence, &spans)?;
    assert_eq!(values.shape().dims(), &[1, 1, 2, 1]);
    assert_eq!(mask.as_slice(), Some(&[true, true][..]));
    Ok(())
}

#[test]
fn test_config_to_forward_pipeline() -> Result<()> {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"sun 1.0 3.0\nflower 3.0 5.0\n").unwrap();
    file.flush().unwrap();

    let config = TokenEmbedderConfig::from_json(&format!(
        r#"{{"type": "pretrained_embedding_mismatched", "pretrained_file": {:?}}}"#,
        file.path()
    ))?;
    let embedder = match config.build::<f32>()? {
        BuiltEmbedder::Mismatched(e) => e,
        BuiltEmbedder::Matched(_) => panic!("config resolved to the wrong variant"),
    };

    // "sunflower" split into two wordpieces, pooled back into one token.
    let token_ids = Tensor::from_vec(vec![0i64, 1], &[1, 2])?;
    let mask = Tensor::from_vec(vec![true], &[1, 1])?;
    let offsets = Tensor::from_vec(vec![0i64, 1], &[1, 1, 2])?;
    let wordpiece_mask = Tensor::from_vec(vec![true, true], &[1, 2])?;

    let words = embedder.forward(&token_ids, &mask, &offsets, &wordpiece_mask, None, None)?;
    assert_eq!(words.shape().dims(), &[1, 1, 2]);
    assert_eq!(words.as_slice(), Some(&[2.0, 4.0][..]));
    Ok(())
}
