//! BPMN export tests

use workflow_modelling_sdk::export::{BpmnExporter, ExportError};
use workflow_modelling_sdk::models::{
    ApprovalRule, Assignee, NodeData, WorkflowEdge, WorkflowNode,
};
use workflow_modelling_sdk::validation::validate_xml_structure;

fn roster_entry(id: &str, name: &str, role: Option<&str>) -> Assignee {
    let mut assignee = Assignee::new(name);
    assignee.id = id.to_string();
    assignee.role = role.map(|r| r.to_string());
    assignee
}

fn export(
    nodes: &[WorkflowNode],
    edges: &[WorkflowEdge],
    assignees: &[Assignee],
    name: &str,
) -> String {
    BpmnExporter::new()
        .export_graph(nodes, edges, assignees, name)
        .unwrap()
        .content
}

fn count(haystack: &str, needle: &str) -> usize {
    haystack.matches(needle).count()
}

const DEFINITIONS_OPEN: &str = concat!(
    "<definitions xmlns=\"http://www.omg.org/spec/BPMN/20100524/MODEL\"",
    " xmlns:bpmndi=\"http://www.omg.org/spec/BPMN/20100524/DI\"",
    " xmlns:omgdc=\"http://www.omg.org/spec/DD/20100524/DC\"",
    " xmlns:omgdi=\"http://www.omg.org/spec/DD/20100524/DI\"",
    " xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\"",
    " id=\"Definitions_1\"",
    " targetNamespace=\"http://bpmn.io/schema/bpmn\"",
    " exporter=\"Workflow Visual Editor\"",
    " exporterVersion=\"1.0\">",
);

mod document_shape_tests {
    use super::*;

    #[test]
    fn test_three_node_scenario_renders_exact_document() {
        let nodes = vec![
            WorkflowNode::start("s1", "Begin"),
            WorkflowNode::approval("a1", "Review", vec!["u1".to_string()], ApprovalRule::All),
            WorkflowNode::end("e1", "Done"),
        ];
        let edges = vec![
            WorkflowEdge::new("ed1", "s1", "a1"),
            WorkflowEdge::new("ed2", "a1", "e1"),
        ];
        let assignees = vec![roster_entry("u1", "Amy", Some("Manager"))];

        let content = export(&nodes, &edges, &assignees, "Review Flow");

        let expected = [
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>",
            DEFINITIONS_OPEN,
            "  <process id=\"Process_1\" name=\"Review Flow\" isExecutable=\"true\">",
            "    <laneSet id=\"LaneSet_1\">",
            "      <lane id=\"Lane_1\" name=\"Amy (Manager)\">",
            "        <flowNodeRef>a1</flowNodeRef>",
            "      </lane>",
            "    </laneSet>",
            "    <startEvent id=\"s1\" name=\"Begin\" />",
            "    <userTask id=\"a1\" name=\"Review\" implementation=\"approval\">",
            "      <performer>",
            "        <resourceRef>u1</resourceRef>",
            "      </performer>",
            "    </userTask>",
            "    <endEvent id=\"e1\" name=\"Done\" />",
            "    <sequenceFlow id=\"ed1\" sourceRef=\"s1\" targetRef=\"a1\" />",
            "    <sequenceFlow id=\"ed2\" sourceRef=\"a1\" targetRef=\"e1\" />",
            "  </process>",
            "  <collaboration id=\"Collaboration_1\">",
            "    <participant id=\"Participant_1\" name=\"Review Flow\" processRef=\"Process_1\" />",
            "  </collaboration>",
            "</definitions>",
        ]
        .join("\n");
        assert_eq!(content, expected);
    }

    #[test]
    fn test_empty_graph_keeps_collaboration_and_self_closing_process() {
        let content = export(&[], &[], &[], "");

        let expected = [
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>",
            DEFINITIONS_OPEN,
            "  <process id=\"Process_1\" name=\"Workflow Process\" isExecutable=\"true\" />",
            "  <collaboration id=\"Collaboration_1\">",
            "    <participant id=\"Participant_1\" name=\"Workflow Process\" processRef=\"Process_1\" />",
            "  </collaboration>",
            "</definitions>",
        ]
        .join("\n");
        assert_eq!(content, expected);
    }

    #[test]
    fn test_output_is_deterministic() {
        let nodes = vec![
            WorkflowNode::start("s1", "Begin"),
            WorkflowNode::condition("c1", "Over budget?", Some("amount > 1000".to_string())),
            WorkflowNode::end("e1", "Done"),
        ];
        let edges = vec![WorkflowEdge::new("ed1", "s1", "c1").with_label("yes")];
        let assignees = vec![roster_entry("u1", "Amy", None)];

        let first = export(&nodes, &edges, &assignees, "Budget");
        let second = export(&nodes, &edges, &assignees, "Budget");
        assert_eq!(first, second);
    }

    #[test]
    fn test_output_is_well_formed_with_one_declaration() {
        let nodes = vec![
            WorkflowNode::start("s1", "Begin"),
            WorkflowNode::application("ap1", "File claim", vec!["u2".to_string()]),
            WorkflowNode::condition("c1", "Over budget?", Some("amount > 1000".to_string())),
            WorkflowNode::approval(
                "a1",
                "Review",
                vec!["u1".to_string(), "u2".to_string()],
                ApprovalRule::Majority,
            ),
            WorkflowNode::end("e1", "Done"),
        ];
        let edges = vec![
            WorkflowEdge::new("ed1", "s1", "ap1"),
            WorkflowEdge::new("ed2", "ap1", "c1"),
            WorkflowEdge::new("ed3", "c1", "a1").with_label("yes"),
            WorkflowEdge::new("ed4", "c1", "e1").with_label("no"),
            WorkflowEdge::new("ed5", "a1", "e1"),
        ];
        let assignees = vec![
            roster_entry("u1", "Amy", Some("Manager")),
            roster_entry("u2", "Ben", None),
        ];

        let content = export(&nodes, &edges, &assignees, "Claims");
        validate_xml_structure(&content).unwrap();
        assert_eq!(count(&content, "<?xml"), 1);
        assert_eq!(count(&content, "<definitions"), 1);
    }

    #[test]
    fn test_lane_set_precedes_flow_elements() {
        let nodes = vec![WorkflowNode::approval(
            "a1",
            "Review",
            vec!["u1".to_string()],
            ApprovalRule::All,
        )];
        let assignees = vec![roster_entry("u1", "Amy", None)];

        let content = export(&nodes, &[], &assignees, "Review Flow");
        let lane_set_at = content.find("<laneSet").unwrap();
        let task_at = content.find("<userTask").unwrap();
        assert!(lane_set_at < task_at);
    }
}

mod node_mapping_tests {
    use super::*;

    #[test]
    fn test_application_description_becomes_documentation() {
        let mut nodes = vec![WorkflowNode::application("ap1", "File claim", Vec::new())];
        if let NodeData::Application { description, .. } = &mut nodes[0].data {
            *description = Some("Attach the receipt".to_string());
        }

        let content = export(&nodes, &[], &[], "Claims");
        assert!(content.contains(
            "<userTask id=\"ap1\" name=\"File claim\" implementation=\"application\">"
        ));
        assert!(content.contains("<documentation>Attach the receipt</documentation>"));
    }

    #[test]
    fn test_application_without_description_self_closes() {
        let nodes = vec![WorkflowNode::application("ap1", "File claim", Vec::new())];

        let content = export(&nodes, &[], &[], "Claims");
        assert!(content.contains(
            "<userTask id=\"ap1\" name=\"File claim\" implementation=\"application\" />"
        ));
        assert!(!content.contains("<documentation>"));
    }

    #[test]
    fn test_approval_without_assignees_self_closes() {
        let nodes = vec![WorkflowNode::approval(
            "a1",
            "Review",
            Vec::new(),
            ApprovalRule::All,
        )];

        let content = export(&nodes, &[], &[], "Review Flow");
        assert!(
            content.contains("<userTask id=\"a1\" name=\"Review\" implementation=\"approval\" />")
        );
        assert!(!content.contains("<performer>"));
    }

    #[test]
    fn test_approval_performers_follow_assignee_order() {
        let nodes = vec![WorkflowNode::approval(
            "a1",
            "Review",
            vec!["u2".to_string(), "u1".to_string()],
            ApprovalRule::All,
        )];

        let content = export(&nodes, &[], &[], "Review Flow");
        let first = content.find("<resourceRef>u2</resourceRef>").unwrap();
        let second = content.find("<resourceRef>u1</resourceRef>").unwrap();
        assert!(first < second);
        assert_eq!(count(&content, "<performer>"), 2);
    }

    #[test]
    fn test_condition_text_becomes_gateway_documentation() {
        let nodes = vec![WorkflowNode::condition(
            "c1",
            "Over budget?",
            Some("amount > 1000".to_string()),
        )];

        let content = export(&nodes, &[], &[], "Budget");
        assert!(content.contains("<exclusiveGateway id=\"c1\" name=\"Over budget?\">"));
        assert!(content.contains("<documentation>amount &gt; 1000</documentation>"));
    }

    #[test]
    fn test_condition_without_text_self_closes() {
        let nodes = vec![WorkflowNode::condition("c1", "Over budget?", None)];

        let content = export(&nodes, &[], &[], "Budget");
        assert!(content.contains("<exclusiveGateway id=\"c1\" name=\"Over budget?\" />"));
    }

    #[test]
    fn test_unknown_node_type_is_skipped() {
        let nodes = vec![
            WorkflowNode::start("s1", "Begin"),
            WorkflowNode::new("t1", NodeData::Unknown),
            WorkflowNode::end("e1", "Done"),
        ];
        let edges = vec![WorkflowEdge::new("ed1", "s1", "e1")];

        let content = export(&nodes, &edges, &[], "Flow");
        assert!(!content.contains("t1"));
        assert!(content.contains("<startEvent id=\"s1\""));
        assert!(content.contains("<sequenceFlow id=\"ed1\""));
    }

    #[test]
    fn test_labels_are_escaped_in_attributes() {
        let nodes = vec![WorkflowNode::start("s1", "Begin <\"now\" & 'here'>")];

        let content = export(&nodes, &[], &[], "Flow");
        assert!(content.contains(
            "name=\"Begin &lt;&quot;now&quot; &amp; &apos;here&apos;&gt;\""
        ));
    }
}

mod sequence_flow_tests {
    use super::*;

    fn condition_graph() -> (Vec<WorkflowNode>, Vec<Assignee>) {
        let nodes = vec![
            WorkflowNode::condition("c1", "Over budget?", Some("amount > 1000".to_string())),
            WorkflowNode::approval("a1", "Review", Vec::new(), ApprovalRule::All),
            WorkflowNode::end("e1", "Done"),
        ];
        (nodes, Vec::new())
    }

    #[test]
    fn test_labeled_edge_from_condition_gets_condition_expression() {
        let (nodes, assignees) = condition_graph();
        let edges = vec![WorkflowEdge::new("ed1", "c1", "a1").with_label("amount > 1000")];

        let content = export(&nodes, &edges, &assignees, "Budget");
        assert!(content.contains(
            "<sequenceFlow id=\"ed1\" name=\"amount &gt; 1000\" sourceRef=\"c1\" targetRef=\"a1\">"
        ));
        assert!(content.contains(
            "<conditionExpression xsi:type=\"tFormalExpression\">amount &gt; 1000</conditionExpression>"
        ));
    }

    #[test]
    fn test_unlabeled_edge_from_condition_has_no_expression() {
        let (nodes, assignees) = condition_graph();
        let edges = vec![WorkflowEdge::new("ed1", "c1", "a1")];

        let content = export(&nodes, &edges, &assignees, "Budget");
        assert!(content.contains("<sequenceFlow id=\"ed1\" sourceRef=\"c1\" targetRef=\"a1\" />"));
        assert!(!content.contains("conditionExpression"));
    }

    #[test]
    fn test_labeled_edge_from_non_condition_has_no_expression() {
        let (nodes, assignees) = condition_graph();
        let edges = vec![WorkflowEdge::new("ed1", "a1", "e1").with_label("approved")];

        let content = export(&nodes, &edges, &assignees, "Budget");
        assert!(content.contains(
            "<sequenceFlow id=\"ed1\" name=\"approved\" sourceRef=\"a1\" targetRef=\"e1\" />"
        ));
        assert!(!content.contains("conditionExpression"));
    }

    #[test]
    fn test_dangling_source_skips_enrichment_but_keeps_flow() {
        let (nodes, assignees) = condition_graph();
        let edges = vec![WorkflowEdge::new("ed1", "ghost", "a1").with_label("yes")];

        let content = export(&nodes, &edges, &assignees, "Budget");
        assert!(content.contains(
            "<sequenceFlow id=\"ed1\" name=\"yes\" sourceRef=\"ghost\" targetRef=\"a1\" />"
        ));
        assert!(!content.contains("conditionExpression"));
    }
}

mod lane_tests {
    use super::*;

    #[test]
    fn test_roster_entries_without_tasks_produce_no_lane() {
        let nodes = vec![WorkflowNode::approval(
            "a1",
            "Review",
            vec!["u2".to_string()],
            ApprovalRule::All,
        )];
        let assignees = vec![
            roster_entry("u1", "Amy", None),
            roster_entry("u2", "Ben", None),
        ];

        let content = export(&nodes, &[], &assignees, "Review Flow");
        assert_eq!(count(&content, "<lane "), 1);
        // Lane numbering runs over the emitted lanes, not the roster.
        assert!(content.contains("<lane id=\"Lane_1\" name=\"Ben (assignee)\">"));
    }

    #[test]
    fn test_no_lane_set_without_any_task_reference() {
        let nodes = vec![WorkflowNode::start("s1", "Begin")];
        let assignees = vec![roster_entry("u1", "Amy", None)];

        let content = export(&nodes, &[], &assignees, "Flow");
        assert!(!content.contains("laneSet"));
    }

    #[test]
    fn test_lanes_follow_roster_order() {
        let nodes = vec![
            WorkflowNode::approval("a1", "First", vec!["u2".to_string()], ApprovalRule::All),
            WorkflowNode::approval("a2", "Second", vec!["u1".to_string()], ApprovalRule::All),
        ];
        let assignees = vec![
            roster_entry("u1", "Amy", None),
            roster_entry("u2", "Ben", None),
        ];

        let content = export(&nodes, &[], &assignees, "Flow");
        assert!(content.contains("<lane id=\"Lane_1\" name=\"Amy (assignee)\">"));
        assert!(content.contains("<lane id=\"Lane_2\" name=\"Ben (assignee)\">"));
        let amy_at = content.find("Amy (assignee)").unwrap();
        let ben_at = content.find("Ben (assignee)").unwrap();
        assert!(amy_at < ben_at);
    }

    #[test]
    fn test_shared_task_is_referenced_from_each_lane() {
        let nodes = vec![WorkflowNode::approval(
            "a1",
            "Review",
            vec!["u1".to_string(), "u2".to_string()],
            ApprovalRule::All,
        )];
        let assignees = vec![
            roster_entry("u1", "Amy", None),
            roster_entry("u2", "Ben", None),
        ];

        let content = export(&nodes, &[], &assignees, "Flow");
        assert_eq!(count(&content, "<flowNodeRef>a1</flowNodeRef>"), 2);
        assert_eq!(count(&content, "<lane "), 2);
    }

    #[test]
    fn test_application_assignee_gets_lane_but_no_performer() {
        let nodes = vec![WorkflowNode::application(
            "ap1",
            "File claim",
            vec!["u1".to_string()],
        )];
        let assignees = vec![roster_entry("u1", "Amy", None)];

        let content = export(&nodes, &[], &assignees, "Claims");
        assert!(content.contains("<flowNodeRef>ap1</flowNodeRef>"));
        assert!(!content.contains("<performer>"));
    }
}

mod error_tests {
    use super::*;

    #[test]
    fn test_empty_node_id_is_rejected() {
        let nodes = vec![WorkflowNode::start("", "Begin")];
        let err = BpmnExporter::new()
            .export_graph(&nodes, &[], &[], "Flow")
            .unwrap_err();
        assert!(matches!(err, ExportError::ValidationError(_)));
    }

    #[test]
    fn test_empty_edge_id_is_rejected() {
        let nodes = vec![WorkflowNode::start("s1", "Begin")];
        let edges = vec![WorkflowEdge::new("", "s1", "s1")];
        let err = BpmnExporter::new()
            .export_graph(&nodes, &edges, &[], "Flow")
            .unwrap_err();
        assert!(matches!(err, ExportError::ValidationError(_)));
    }
}

mod escaping_properties {
    use super::*;
    use proptest::prelude::*;
    use workflow_modelling_sdk::export::xml::escape_xml;

    /// Inverse of `escape_xml`; `&amp;` is decoded last so entities
    /// introduced by escaping collapse back exactly once.
    fn unescape_xml(value: &str) -> String {
        value
            .replace("&apos;", "'")
            .replace("&quot;", "\"")
            .replace("&gt;", ">")
            .replace("&lt;", "<")
            .replace("&amp;", "&")
    }

    proptest! {
        #[test]
        fn escaping_round_trips(original in "[a-zA-Z0-9 &<>\"'=/._-]{0,64}") {
            let escaped = escape_xml(&original);
            prop_assert_eq!(unescape_xml(&escaped), original);
        }

        #[test]
        fn escaped_text_contains_no_raw_markup(original in "[a-zA-Z0-9 &<>\"']{0,64}") {
            let escaped = escape_xml(&original);
            prop_assert!(!escaped.contains('<'));
            prop_assert!(!escaped.contains('>'));
            prop_assert!(!escaped.contains('"'));
        }

        #[test]
        fn documents_stay_well_formed_for_any_label(label in "[a-zA-Z0-9 &<>\"']{0,32}") {
            let nodes = vec![
                WorkflowNode::start("s1", label.clone()),
                WorkflowNode::condition("c1", label.clone(), Some(label.clone())),
                WorkflowNode::end("e1", label.clone()),
            ];
            let edges = vec![
                WorkflowEdge::new("ed1", "s1", "c1"),
                WorkflowEdge::new("ed2", "c1", "e1").with_label(label.clone()),
            ];

            let content = export(&nodes, &edges, &[], &label);
            prop_assert!(validate_xml_structure(&content).is_ok());
        }
    }
}
