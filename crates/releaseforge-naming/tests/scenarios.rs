//! End-to-end naming scenarios.

use releaseforge_naming::{
    sanitize, AudioTrackInfo, CatalogRecord, EpisodeInfo, FormatVariant, GroupPolicy,
    MediaDescriptor, NameEngine, NamingWarning, ReleaseOptions, VideoCategory, RESERVED,
};

fn audio(format: &str, commercial: Option<&str>, channels: u32, layout: &str) -> AudioTrackInfo {
    AudioTrackInfo {
        format: Some(format.into()),
        commercial: commercial.map(Into::into),
        channels: Some(channels),
        channel_layout: Some(layout.into()),
        language: Some("en".into()),
        ..Default::default()
    }
}

#[test]
fn standard_movie_scenario() {
    let media = MediaDescriptor::new("Inception.2010.1080p.BluRay.AVC-GRP.mkv")
        .with_video_format("AVC")
        .with_dimensions(1920, 1080)
        .with_frame_rate("23.976")
        .with_audio(audio("AC-3", Some("Dolby Digital"), 6, "L R C LFE Ls Rs"));
    let opts = ReleaseOptions {
        source_label: "BluRay".into(),
        release_group: Some("GRP".into()),
        ..Default::default()
    };

    let d = NameEngine::default()
        .derive(&media, &CatalogRecord::movie("Inception", "2010-07-15"), &opts, None)
        .unwrap();

    assert_eq!(d.name.as_str(), "Inception.2010.1080p.BluRay.DD5.1.H.264-GRP.mkv");
    assert!(d.warnings.is_empty());
}

#[test]
fn extended_episode_scenario() {
    let media = MediaDescriptor::new("Show.S01E02.Pilot.720p.WEB-DL.AAC2.0.H265-GRP.mkv")
        .with_video_format("HEVC")
        .with_dimensions(1280, 720)
        .with_audio(audio("AAC", None, 2, "L R"));
    let opts = ReleaseOptions {
        source_label: "WEB-DL".into(),
        release_group: Some("GRP".into()),
        format_variant: FormatVariant::ExtendedTrackerFormat,
        ..Default::default()
    };
    let episode = EpisodeInfo::new(1, Some(2)).with_title("Pilot");

    let d = NameEngine::default()
        .derive(
            &media,
            &CatalogRecord::series("Show", "2020-01-10"),
            &opts,
            Some(&episode),
        )
        .unwrap();

    assert_eq!(
        d.name.as_str(),
        "Show (2020) - S01E02 - Pilot (720p WEB-DL H265 SDR AAC 2.0 English - GRP).mkv"
    );
}

#[test]
fn episode_title_read_from_file_name() {
    let media = MediaDescriptor::new("Show.S01E02.Pilot.720p.WEB-DL.AAC2.0.H265-GRP.mkv")
        .with_video_format("HEVC")
        .with_dimensions(1280, 720)
        .with_audio(audio("AAC", None, 2, "L R"));
    let opts = ReleaseOptions {
        source_label: "WEB-DL".into(),
        format_variant: FormatVariant::ExtendedTrackerFormat,
        ..Default::default()
    };

    let d = NameEngine::default()
        .derive(&media, &CatalogRecord::series("Show", "2020-01-10"), &opts, None)
        .unwrap();

    assert_eq!(
        d.name.as_str(),
        "Show (2020) - S01E02 - Pilot (720p WEB-DL H265 SDR AAC 2.0 English - GRP).mkv"
    );
}

#[test]
fn banned_remux_group_still_names() {
    let media = MediaDescriptor::new("Movie.2019.2160p.UHD.BluRay.REMUX.HEVC-4K4U.mkv")
        .with_video_format("HEVC")
        .with_dimensions(3840, 2160)
        .with_audio(audio(
            "MLP FBA 16-ch",
            Some("Dolby TrueHD with Dolby Atmos"),
            8,
            "L R C LFE Ls Rs Lb Rb",
        ));
    let mut media = media;
    media.hdr_format = Some("Dolby Vision / SMPTE ST 2086".into());
    media.hdr_compatibility = Some("Blu-ray / HDR10".into());

    let opts = ReleaseOptions {
        source_label: "BluRay Remux".into(),
        release_group: Some("4K4U".into()),
        format_variant: FormatVariant::ExtendedTrackerFormat,
        ..Default::default()
    };

    let engine = NameEngine::default();
    let verdict = engine.policy().evaluate("4K4U", VideoCategory::Remux);
    assert!(!verdict.allowed);

    let d = engine
        .derive(&media, &CatalogRecord::movie("Movie", "2019-03-01"), &opts, None)
        .unwrap();

    assert_eq!(
        d.name.as_str(),
        "Movie (2019) (2160p BluRay Remux HEVC DV HDR TrueHD Atmos 7.1 English - 4K4U).mkv"
    );
    assert_eq!(
        d.banned_group(),
        Some(&NamingWarning::BannedGroup {
            group: "4K4U".into(),
            category: VideoCategory::Remux,
        })
    );
}

#[test]
fn custom_policy_bans_extra_group() {
    let mut policy = GroupPolicy::builtin();
    policy.ban(VideoCategory::Web, ["LocalBad"]);
    let media = MediaDescriptor::new("Movie.2021.1080p.WEB-DL.mkv")
        .with_video_format("AVC")
        .with_dimensions(1920, 1080)
        .with_audio(audio("E-AC-3", Some("Dolby Digital Plus"), 6, "L R C LFE Ls Rs"));
    let opts = ReleaseOptions {
        source_label: "WEB-DL".into(),
        release_group: Some("localbad".into()),
        ..Default::default()
    };

    let d = NameEngine::new(policy)
        .derive(&media, &CatalogRecord::movie("Movie", "2021-01-01"), &opts, None)
        .unwrap();

    assert_eq!(d.name.as_str(), "Movie.2021.1080p.WEB-DL.DDP5.1.H.264-localbad.mkv");
    assert!(d.banned_group().is_some());
}

#[test]
fn concurrent_derivations_are_independent() {
    let engine = NameEngine::default();
    let inputs: Vec<(MediaDescriptor, CatalogRecord)> = (0..32)
        .map(|i| {
            let width = [1920, 1280, 3840, 720][i % 4];
            let media = MediaDescriptor::new(format!("Title{i}.20{:02}.WEB-DL-GRP{i}.mkv", i % 30))
                .with_video_format(if i % 2 == 0 { "AVC" } else { "HEVC" })
                .with_dimensions(width, 0)
                .with_frame_rate(if i % 3 == 0 { "29.970" } else { "25.000" })
                .with_audio(audio("AAC", None, 2, "L R"));
            let catalog = CatalogRecord::movie(format!("Title {i}"), format!("20{:02}-01-01", i % 30));
            (media, catalog)
        })
        .collect();
    let opts = ReleaseOptions {
        source_label: "WEB-DL".into(),
        ..Default::default()
    };

    let sequential: Vec<String> = inputs
        .iter()
        .map(|(m, c)| engine.derive(m, c, &opts, None).unwrap().name.into_inner())
        .collect();

    let concurrent: Vec<String> = std::thread::scope(|scope| {
        let handles: Vec<_> = inputs
            .iter()
            .map(|(m, c)| {
                let engine = &engine;
                let opts = &opts;
                scope.spawn(move || engine.derive(m, c, opts, None).unwrap().name.into_inner())
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(sequential, concurrent);
    assert!(sequential[0].ends_with("-GRP0.mkv"));
}

#[test]
fn sanitize_is_idempotent_over_hostile_names() {
    let corpus = [
        "",
        "CON:<>",
        "a/b\\c",
        "\u{0}\u{1f}\u{7f}\u{80}\u{9f}",
        "Mission: Impossible? (1996) *Special*",
        "tab\tnew\nline\rcarriage",
        "\"quoted\" | piped",
        "ünïcødé – dash … ellipsis",
        "::::////",
    ];
    for input in corpus {
        let once = sanitize(input);
        let twice = sanitize(once.as_str());
        assert_eq!(once, twice, "input: {input:?}");
        assert!(!once.as_str().chars().any(|c| RESERVED.contains(&c) || c.is_control()));
    }
}

#[test]
fn derived_names_never_contain_reserved_characters() {
    let media = MediaDescriptor::new("What?.2001.1080p.WEB-DL-G|RP.mkv")
        .with_dimensions(1920, 1080)
        .with_audio(audio("AAC", None, 2, "L R"));
    let opts = ReleaseOptions {
        source_label: "WEB-DL".into(),
        release_group: Some("G*R\"P".into()),
        format_variant: FormatVariant::ExtendedTrackerFormat,
        ..Default::default()
    };

    let d = NameEngine::default()
        .derive(&media, &CatalogRecord::movie("What? <Now>: \"Yes\"", "2001-05-05"), &opts, None)
        .unwrap();

    assert!(!d.name.as_str().chars().any(|c| RESERVED.contains(&c)));
    assert_eq!(d.name.as_str(), "What Now Yes (2001) (1080p WEB-DL H264 SDR AAC 2.0 English - GRP).mkv");
}
