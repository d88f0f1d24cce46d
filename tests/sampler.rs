use std::io::Cursor;

use anyhow::Result;
use vcdwave::{
    EdgeSampler, Error, Logic, PathTable, SamplerOptions, TraceReader, ValueState,
};

const HEADER: &str = "\
$timescale 1ns $end
$scope module tb $end
$var wire 1 ! clk $end
$var wire 1 \" data $end
$var reg 8 # bus [7:0] $end
$upscope $end
$enddefinitions $end
";

fn sampler(body: &str, options: SamplerOptions) -> Result<EdgeSampler<Cursor<Vec<u8>>>> {
    let text = format!("{HEADER}{body}");
    let mut reader = TraceReader::new(Cursor::new(text.into_bytes()));
    let table: PathTable = reader.read_header()?.select(Vec::<String>::new())?.build()?;
    Ok(EdgeSampler::new(reader, &table, options)?)
}

fn options(chunk_size: usize, start_time: u64, end_time: u64) -> SamplerOptions {
    SamplerOptions {
        chunk_size,
        start_time,
        end_time,
    }
}

/// Clock rising at 0 and 10, falling at 5 and 15.
const TWO_CYCLES: &str = "\
#0
1!
#5
0!
#10
1!
#15
0!
#20
";

/// Seven full clock cycles with a period of 10.
fn seven_cycles() -> String {
    let mut body = String::new();
    for cycle in 0..7u64 {
        let t = cycle * 10;
        body.push_str(&format!("#{t}\n1!\nb{:08b} #\n#{}\n0!\n", cycle, t + 5));
    }
    body.push_str("#70\n");
    body
}

#[test]
fn chunk_origin_is_the_opening_rising_edge() -> Result<()> {
    let mut sampler = sampler(TWO_CYCLES, options(1, 0, 0))?;

    let first = sampler.next_chunk()?;
    assert_eq!(first.len(), 1);
    assert_eq!(first.origin(), 0);

    let second = sampler.next_chunk()?;
    assert_eq!(second.len(), 1);
    assert_eq!(second.origin(), 10);

    assert!(sampler.next_chunk()?.is_empty());
    Ok(())
}

#[test]
fn start_time_is_compared_with_the_chunk_origin() -> Result<()> {
    let mut sampler = sampler(TWO_CYCLES, options(1, 10, 0))?;
    let chunk = sampler.next_chunk()?;
    // the falling edge at 5 belongs to the window opened at 0 and is skipped
    assert_eq!(chunk.len(), 1);
    assert_eq!(chunk.origin(), 10);
    assert!(sampler.next_chunk()?.is_empty());

    // the rising edge at 10 opens the window of the falling edge at 15
    let mut sampler = self::sampler(TWO_CYCLES, options(1, 12, 0))?;
    assert!(sampler.next_chunk()?.is_empty());
    Ok(())
}

#[test]
fn chunks_split_at_the_configured_size() -> Result<()> {
    let sampler = sampler(&seven_cycles(), options(3, 0, 0))?;
    let chunks = sampler.collect::<vcdwave::Result<Vec<_>>>()?;

    let sizes: Vec<usize> = chunks.iter().map(|c| c.len()).collect();
    assert_eq!(sizes, [3, 3, 1]);
    let origins: Vec<u64> = chunks.iter().map(|c| c.origin()).collect();
    assert_eq!(origins, [0, 30, 60]);

    let bus = chunks[1].samples("#").expect("bus is tracked");
    assert_eq!(
        bus,
        [
            ValueState::from_vector("00000011", 8),
            ValueState::from_vector("00000100", 8),
            ValueState::from_vector("00000101", 8),
        ]
    );
    Ok(())
}

#[test]
fn sampling_resumes_where_it_stopped() -> Result<()> {
    let mut sampler = sampler(&seven_cycles(), options(2, 0, 0))?;
    sampler.next_chunk()?;
    assert_eq!(sampler.now(), 20);
    assert_eq!(sampler.value("!"), Some(&ValueState::Bit(Logic::Zero)));

    let next = sampler.next_chunk()?;
    assert_eq!(next.origin(), 20);
    assert_eq!(sampler.now(), 40);
    Ok(())
}

#[test]
fn end_time_cuts_off_sampling() -> Result<()> {
    let mut sampler = sampler(&seven_cycles(), options(20, 0, 32))?;
    let chunk = sampler.next_chunk()?;
    assert_eq!(chunk.len(), 3);
    assert!(sampler.next_chunk()?.is_empty());
    Ok(())
}

#[test]
fn samples_reflect_values_at_the_falling_edge() -> Result<()> {
    let body = "\
#0
0!
0\"
#5
1!
1\"
#10
0!
#15
1!
0\"
#20
0!
#25
";
    let mut sampler = sampler(body, options(20, 0, 0))?;
    let chunk = sampler.next_chunk()?;
    assert_eq!(chunk.origin(), 5);
    assert_eq!(
        chunk.samples("\"").unwrap(),
        [ValueState::Bit(Logic::One), ValueState::Bit(Logic::Zero)]
    );
    Ok(())
}

#[test]
fn untracked_and_ignored_records_are_skipped() -> Result<()> {
    let body = "\
$dumpvars
0!
1%
b1010 &
r1.5 '
$end
#5
1!
#10
0!
#15
";
    let mut sampler = sampler(body, options(20, 0, 0))?;
    assert_eq!(sampler.next_chunk()?.len(), 1);
    Ok(())
}

#[test]
fn unexpected_leading_character_fails() -> Result<()> {
    let mut sampler = sampler("#0\n1!\n?garbage\n", options(20, 0, 0))?;
    let err = sampler.next_chunk().unwrap_err();
    assert!(matches!(err, Error::UnexpectedToken('?')));
    Ok(())
}

#[test]
fn vector_records_drive_a_single_bit_clock() -> Result<()> {
    let body = "#0\nb0 !\n#5\nb1 !\n#10\nb0 !\n#15\n";
    let mut sampler = sampler(body, options(20, 0, 0))?;
    let chunk = sampler.next_chunk()?;
    assert_eq!(chunk.len(), 1);
    assert_eq!(chunk.origin(), 5);
    Ok(())
}

#[test]
fn single_character_vectors_drive_a_multi_bit_clock() -> Result<()> {
    let text = "\
$scope module tb $end
$var wire 2 ! clk [1:0] $end
$var wire 1 \" data $end
$upscope $end
$enddefinitions $end
#0
b0 !
#5
b1 !
1\"
#10
b0 !
#15
";
    let mut reader = TraceReader::new(Cursor::new(text.as_bytes().to_vec()));
    let table = reader.read_header()?.select(Vec::<String>::new())?.build()?;
    let mut sampler = EdgeSampler::new(reader, &table, options(20, 0, 0))?;

    let chunk = sampler.next_chunk()?;
    assert_eq!(chunk.len(), 1);
    assert_eq!(chunk.origin(), 5);
    assert_eq!(chunk.samples("\""), Some(&[ValueState::Bit(Logic::One)][..]));
    Ok(())
}

#[test]
fn zero_chunk_size_is_rejected() {
    assert!(matches!(
        sampler(TWO_CYCLES, options(0, 0, 0)),
        Err(err) if matches!(err.downcast_ref::<Error>(), Some(Error::InvalidData(_)))
    ));
}
