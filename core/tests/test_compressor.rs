// End-to-end compress/decompress behaviour.

#[cfg(test)]
mod tests {
    use std::io::{Cursor, Read, Write};

    use proptest::prelude::*;

    use huff_core::bitio::{BitReader, BitWriter};
    use huff_core::compression::{decode_body, encode_body, Code, CodeTable, Node};
    use huff_core::headers::{write_header, HeaderError};
    use huff_core::prelude::*;

    const GENESIS: &str = "
      1:1 In the beginning God created the heaven and the earth.

      1:2 And the earth was without form, and void; and darkness was upon
      the face of the deep. And the Spirit of God moved upon the face of the
      waters.
    ";

    /// Header for {a:1, b:1, c:2}: a = 100, b = 101, c = 11.
    fn abc_header() -> Vec<u8> {
        let table: FrequencyTable = [(b'a', 1), (b'b', 1), (b'c', 2)].into_iter().collect();
        let mut out = Vec::new();
        write_header(&mut out, &table).unwrap();
        out
    }

    fn small_buffers() -> Compressor {
        Compressor::new(CodecConfig::new(1, 3)).unwrap()
    }

    #[test]
    fn single_symbol_input() {
        let codec = Compressor::default();
        let packed = codec.compress_to_vec(b"aaaa").unwrap();

        // 8-byte prefix, one 9-byte entry, one body word.
        assert_eq!(packed.len(), 8 + 9 + 8);
        assert_eq!(&packed[..8], &9u64.to_le_bytes());
        assert_eq!(packed[8], b'a');
        assert_eq!(packed[17], 0xf0);
        assert!(packed[18..].iter().all(|&b| b == 0));

        assert_eq!(codec.decompress_to_vec(&packed).unwrap(), b"aaaa");
    }

    #[test]
    fn empty_input_writes_nothing() {
        let mut sink = Vec::new();
        let err = Compressor::default()
            .compress(&mut Cursor::new(Vec::<u8>::new()), &mut sink)
            .unwrap_err();
        assert!(matches!(err, HuffError::EmptyTree));
        assert!(sink.is_empty());
    }

    #[test]
    fn header_without_entries_has_no_tree() {
        let err = Compressor::default().decompress_to_vec(&0u64.to_le_bytes()).unwrap_err();
        assert!(matches!(err, HuffError::EmptyTree));
    }

    #[test]
    fn genesis_round_trip_shrinks() {
        let codec = Compressor::default();
        let packed = codec.compress_to_vec(GENESIS.as_bytes()).unwrap();
        assert!(packed.len() < GENESIS.len(), "{} >= {}", packed.len(), GENESIS.len());
        assert_eq!(codec.decompress_to_vec(&packed).unwrap(), GENESIS.as_bytes());
    }

    #[test]
    fn output_is_deterministic() {
        let codec = Compressor::default();
        let a = codec.compress_to_vec(GENESIS.as_bytes()).unwrap();
        let b = codec.compress_to_vec(GENESIS.as_bytes()).unwrap();
        assert_eq!(a, b);

        // Buffer sizes change chunking only, never the bytes produced.
        assert_eq!(small_buffers().compress_to_vec(GENESIS.as_bytes()).unwrap(), a);
    }

    #[test]
    fn body_ending_on_word_boundary_decodes_cleanly() {
        // 64 one-bit codes fill the only word exactly, leaving no padding.
        let codec = Compressor::default();
        let input = [b'a'; 64];
        let packed = codec.compress_to_vec(&input).unwrap();
        assert_eq!(packed.len(), 17 + 8);
        assert!(packed[17..].iter().all(|&b| b == 0xff));
        assert_eq!(codec.decompress_to_vec(&packed).unwrap(), input);
    }

    #[test]
    fn zero_guard_bit_stops_decoding() {
        // 100 101 11 11 0...
        let mut stream = abc_header();
        stream.extend_from_slice(&[0b1001_0111, 0b1100_0000, 0, 0, 0, 0, 0, 0]);
        assert_eq!(Compressor::default().decompress_to_vec(&stream).unwrap(), b"abcc");
    }

    #[test]
    fn body_cut_mid_word_is_truncated() {
        let codec = Compressor::default();
        let packed = codec.compress_to_vec(&[b'a'; 100]).unwrap();
        assert_eq!(packed.len(), 17 + 16);

        // The second word holds 36 codes: bytes 0..4 are 0xff, byte 4 is 0xf0.
        // Every cut before byte 4 drops codes and lands between one-bit codes.
        for cut in 18..17 + 13 {
            let err = codec.decompress_to_vec(&packed[..cut]).unwrap_err();
            assert!(matches!(err, HuffError::TruncatedStream), "cut at {}: {:?}", cut, err);
        }

        // Cutting only padding keeps every code and its terminating zero.
        assert_eq!(codec.decompress_to_vec(&packed[..17 + 13]).unwrap(), [b'a'; 100]);
    }

    #[test]
    fn body_missing_whole_words_is_truncated() {
        let codec = Compressor::default();
        let packed = codec.compress_to_vec(&[b'a'; 100]).unwrap();
        let err = codec.decompress_to_vec(&packed[..17 + 8]).unwrap_err();
        assert!(matches!(err, HuffError::TruncatedStream), "{:?}", err);
        let err = codec.decompress_to_vec(&packed[..17]).unwrap_err();
        assert!(matches!(err, HuffError::TruncatedStream), "{:?}", err);
    }

    #[test]
    fn body_longer_than_header_total_is_rejected() {
        let table: FrequencyTable = [(b'a', 1)].into_iter().collect();
        let mut stream = Vec::new();
        write_header(&mut stream, &table).unwrap();
        stream.extend_from_slice(&[0xff; 8]);
        let err = Compressor::default().decompress_to_vec(&stream).unwrap_err();
        assert!(matches!(err, HuffError::BodyOverrun { expected: 1, decoded: 64 }), "{:?}", err);
    }

    #[test]
    fn decode_body_ends_cleanly_only_on_word_boundary() {
        let root = Node::leaf(b'z', 1);

        let word = [0xffu8; 8];
        let mut reader = BitReader::new(&word[..], 3).unwrap();
        let mut out = Vec::new();
        assert_eq!(decode_body(&root, &mut reader, &mut out).unwrap(), 64);
        assert!(reader.at_word_boundary());

        let partial = [0xffu8; 5];
        let mut reader = BitReader::new(&partial[..], 3).unwrap();
        let err = decode_body(&root, &mut reader, &mut Vec::new()).unwrap_err();
        assert!(matches!(err, HuffError::TruncatedStream), "{:?}", err);
        assert!(!reader.at_word_boundary());
    }

    #[test]
    fn cut_inside_a_code_is_truncated() {
        // 100 100 1|0 then end of input inside the third code
        let mut stream = abc_header();
        stream.push(0b1001_0010);
        let err = Compressor::default().decompress_to_vec(&stream).unwrap_err();
        assert!(matches!(err, HuffError::TruncatedStream), "{:?}", err);
    }

    #[test]
    fn cut_header_is_reported() {
        let packed = Compressor::default().compress_to_vec(GENESIS.as_bytes()).unwrap();
        let err = Compressor::default().decompress_to_vec(&packed[..12]).unwrap_err();
        assert!(matches!(err, HuffError::Header(HeaderError::Truncated { have: 4, .. })), "{:?}", err);
    }

    #[test]
    fn decodes_hand_built_tree() {
        // 1 = 00, 2 = 01, 3 = 10, 4 = 110, 5 = 111
        let root = Node::merge(
            Node::merge(Node::leaf(1, 1), Node::leaf(2, 1)),
            Node::merge(Node::leaf(3, 1), Node::merge(Node::leaf(4, 1), Node::leaf(5, 1))),
        );
        // guard-prefixed: 100 101 110 1110 1111 0
        let body = [0x97u8, 0x77, 0x80];
        let mut reader = BitReader::new(&body[..], 2).unwrap();
        let mut out = Vec::new();
        assert_eq!(decode_body(&root, &mut reader, &mut out).unwrap(), 5);
        assert_eq!(out, [1, 2, 3, 4, 5]);
    }

    #[test]
    fn symbol_missing_from_table_is_rejected() {
        let mut codes = CodeTable::new();
        codes.insert(b'a', Code::GUARD);
        let mut writer = BitWriter::new(Vec::new(), 1).unwrap();
        let err = encode_body(&mut &b"ab"[..], &codes, &mut writer, 16).unwrap_err();
        assert!(matches!(err, HuffError::UnknownSymbol { symbol: b'b' }));
    }

    #[test]
    fn invalid_config_is_rejected() {
        assert!(matches!(Compressor::new(CodecConfig::new(0, 16)), Err(HuffError::InvalidConfig(_))));
        assert!(matches!(Compressor::new(CodecConfig::new(16, 0)), Err(HuffError::InvalidConfig(_))));
        assert!(matches!(
            Compressor::new(CodecConfig::new(usize::MAX, 16)),
            Err(HuffError::InvalidConfig(_))
        ));
    }

    #[test]
    fn snapshots_describe_both_directions() {
        let codec = Compressor::default();
        let mut packed = Vec::new();
        let snap = codec.compress(&mut Cursor::new(GENESIS.as_bytes()), &mut packed).unwrap();

        assert_eq!(snap.operation, Operation::Compress);
        assert_eq!(snap.bytes_input, GENESIS.len() as u64);
        assert_eq!(snap.bytes_output, packed.len() as u64);
        assert_eq!(snap.bytes_header, 8 + 9 * snap.symbols_distinct);
        assert_eq!(snap.bytes_header + snap.bytes_body, snap.bytes_output);
        assert_eq!(snap.bytes_body % 8, 0);
        assert_eq!(snap.symbols_coded, GENESIS.len() as u64);
        assert!(snap.sanity_check());

        let mut plain = Vec::new();
        let back = codec.decompress(&mut Cursor::new(&packed), &mut plain).unwrap();
        assert_eq!(back.operation, Operation::Decompress);
        assert_eq!(back.bytes_input, packed.len() as u64);
        assert_eq!(back.bytes_output, GENESIS.len() as u64);
        assert_eq!(back.symbols_distinct, snap.symbols_distinct);
        assert!(back.sanity_check());
    }

    #[test]
    fn file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let plain = dir.path().join("genesis.txt");
        let packed = dir.path().join("genesis.huff");
        let restored = dir.path().join("genesis.out");
        std::fs::File::create(&plain).unwrap().write_all(GENESIS.as_bytes()).unwrap();

        let codec = Compressor::default();
        let mut input = open_input(InputSource::File(plain.clone())).unwrap();
        let mut output = open_output(OutputSink::File(packed.clone())).unwrap();
        codec.compress(&mut input, &mut output).unwrap();
        drop(output);

        let mut input = open_input(InputSource::File(packed)).unwrap();
        let mut output = open_output(OutputSink::File(restored.clone())).unwrap();
        codec.decompress(&mut input, &mut output).unwrap();
        drop(output);

        let mut text = String::new();
        std::fs::File::open(&restored).unwrap().read_to_string(&mut text).unwrap();
        assert_eq!(text, GENESIS);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn round_trip_any_bytes(
            data in prop::collection::vec(any::<u8>(), 1..4096),
            words in 1usize..4,
            read in 1usize..64,
        ) {
            let codec = Compressor::new(CodecConfig::new(words, read)).unwrap();
            let packed = codec.compress_to_vec(&data).unwrap();
            prop_assert_eq!(codec.decompress_to_vec(&packed).unwrap(), data);
        }

        #[test]
        fn skewed_input_round_trips(
            data in prop::collection::vec(prop_oneof![8 => Just(b'e'), 1 => any::<u8>()], 1..2048),
        ) {
            let codec = small_buffers();
            let packed = codec.compress_to_vec(&data).unwrap();
            prop_assert_eq!(codec.compress_to_vec(&data).unwrap(), packed.clone());
            prop_assert_eq!(codec.decompress_to_vec(&packed).unwrap(), data);
        }
    }
}
