use assert_matches::assert_matches;
use pretty_assertions::assert_eq;

use atem_codec::{
    Envelope, Field, Tag, TransferCommand, TransferCompleteNotice, TransferDirection,
    TransferRequest, TransferSession, TransferState,
};

fn device_frame(tag: &[u8; 4], payload: &[u8]) -> Vec<u8> {
    Envelope::encode(Tag::new(*tag), payload).expect("small payload")
}

fn feed(session: &mut TransferSession, buffer: &[u8]) -> Vec<Vec<u8>> {
    let mut sent = Vec::new();
    for frame in Envelope::split(buffer) {
        let field = frame.expect("well-formed frame").decode().expect("decodable frame");
        for command in session.handle(&field).expect("valid transition") {
            sent.push(command.encode().expect("small command"));
        }
    }
    sent
}

fn tags(frames: &[Vec<u8>]) -> Vec<String> {
    frames
        .iter()
        .map(|frame| String::from_utf8_lossy(&frame[4..8]).into_owned())
        .collect()
}

#[test]
fn upload_runs_from_lock_to_release() {
    let request = TransferRequest::builder()
        .transfer(5)
        .store(0)
        .slot(3)
        .direction(TransferDirection::Upload)
        .data(vec![1, 2, 3, 4, 5])
        .name("logo")
        .build()
        .expect("valid upload");
    let mut session = TransferSession::new(request);

    let opening = session.start().expect("idle session starts");
    assert_matches!(opening.as_slice(), [TransferCommand::Lock(lock)] if lock.locked);

    let mut inbound = device_frame(b"LKOB", &[0, 0, 0, 0]);
    inbound.extend(device_frame(b"FTCD", &[0, 5, 0, 0, 0, 0, 0, 4, 0, 2, 0, 0]));
    let sent = feed(&mut session, &inbound);
    assert_eq!(vec!["FTSD", "FTDa", "FTDa", "FTFD"], tags(&sent));
    assert_eq!(TransferState::Finalizing, session.state());

    let sent = feed(&mut session, &device_frame(b"FTDC", &[0, 5, 1, 2]));
    assert_eq!(vec!["LOCK"], tags(&sent));
    assert_eq!(vec![0, 0, 0, 0], sent[0][8..].to_vec());
    assert_eq!(TransferState::Complete, session.state());

    let notice = TransferCompleteNotice::new(0, 3, true);
    let frame = notice.encode().expect("small notice");
    let decoded: Vec<_> = Envelope::split(&frame).collect();
    assert_matches!(decoded.as_slice(), [Ok(raw)] if raw.tag() == atem_codec::TRANSFER_COMPLETE_TAG);
    assert_eq!(Ok(notice), TransferCompleteNotice::decode(&frame[8..]));
}

#[test]
fn download_collects_chunks_in_order() {
    let request = TransferRequest::builder()
        .transfer(9)
        .store(1)
        .slot(0)
        .direction(TransferDirection::Download)
        .build()
        .expect("valid download");
    let mut session = TransferSession::new(request);
    session.start().expect("idle session starts");

    let mut inbound = device_frame(b"LKOB", &[0, 1, 0, 0]);
    inbound.extend(device_frame(b"FTDa", &[0, 9, 0, 2, 0xAA, 0xBB]));
    inbound.extend(device_frame(b"FTDa", &[0, 9, 0, 1, 0xCC, 0]));
    inbound.extend(device_frame(b"FTDC", &[0, 9, 1, 2]));
    let sent = feed(&mut session, &inbound);

    assert_eq!(vec!["FTSU", "FTUA", "FTUA", "LOCK"], tags(&sent));
    assert_eq!(TransferState::Complete, session.state());
    assert_eq!(vec![0xAA, 0xBB, 0xCC], session.into_received());
}

#[test]
fn device_error_ends_the_session() {
    let request = TransferRequest::builder()
        .transfer(2)
        .store(0)
        .slot(0)
        .direction(TransferDirection::Download)
        .build()
        .expect("valid download");
    let mut session = TransferSession::new(request);
    session.start().expect("idle session starts");

    let mut inbound = device_frame(b"LKOB", &[0, 0, 0, 0]);
    inbound.extend(device_frame(b"FTDE", &[0, 2, 2, 0]));
    let sent = feed(&mut session, &inbound);

    assert_eq!(vec!["FTSU"], tags(&sent));
    assert!(session.state().is_terminal());
    assert_matches!(session.state(), TransferState::Error(_));
    assert_matches!(
        session.handle(&Field::decode(Tag::new(*b"LKOB"), &[0, 0, 0, 0]).expect("lock grant")),
        Ok(commands) if commands.is_empty()
    );
}
