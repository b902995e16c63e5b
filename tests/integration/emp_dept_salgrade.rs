//! The classic employee/department/salary-grade query suite, rebuilt as
//! staged pipelines over the seeded row store.

mod common;

use common::{comm, dept_no, job, loc, seeded_store};
use tabula::query::aggregate::Group;
use tabula::{Department, Employee, Pipeline, Predicate, SalaryGrade};

fn names(rows: &[Employee]) -> Vec<&str> {
    rows.iter().map(|e| e.ename.as_str()).collect()
}

// SELECT * FROM emp WHERE job = 'SALESMAN'
#[test]
fn salesmen_only() {
    let store = seeded_store();
    let rows = store
        .scan::<Employee>("emp")
        .unwrap()
        .filter(Predicate::eq(job(), "SALESMAN"))
        .materialize()
        .unwrap();
    assert_eq!(names(&rows), vec!["ALLEN", "WARD", "MARTIN", "TURNER"]);
    assert!(rows.iter().all(|e| e.job == "SALESMAN"));
}

// SELECT * FROM emp WHERE dept_no = 30 ORDER BY sal DESC
#[test]
fn dept_30_ordered_by_salary_descending() {
    let store = seeded_store();
    let rows = store
        .scan::<Employee>("emp")
        .unwrap()
        .filter(Predicate::eq(dept_no(), 30i64))
        .sort_by(|a, b| b.sal.total_cmp(&a.sal))
        .materialize()
        .unwrap();
    // WARD and MARTIN tie at 1250; the stable sort keeps input order.
    assert_eq!(
        names(&rows),
        vec!["BLAKE", "ALLEN", "TURNER", "WARD", "MARTIN", "JAMES"]
    );
}

// SELECT * FROM emp WHERE dept_no IN (SELECT dept_no FROM dept WHERE loc = 'CHICAGO')
#[test]
fn employees_located_in_chicago() {
    let store = seeded_store();
    let chicago_depts: Vec<i64> = store
        .scan::<Department>("dept")
        .unwrap()
        .filter(Predicate::eq(loc(), "CHICAGO"))
        .project(|d| d.dept_no)
        .materialize()
        .unwrap();
    assert_eq!(chicago_depts, vec![30]);

    let rows = store
        .scan::<Employee>("emp")
        .unwrap()
        .filter(Predicate::in_list(dept_no(), chicago_depts))
        .materialize()
        .unwrap();
    assert_eq!(rows.len(), 6);
    assert!(rows.iter().all(|e| e.dept_no == 30));
}

// SELECT ename, sal FROM emp
#[test]
fn name_and_salary_projection() {
    #[derive(Debug, PartialEq)]
    struct NameSal {
        ename: String,
        sal: f64,
    }

    let store = seeded_store();
    let rows = store
        .scan::<Employee>("emp")
        .unwrap()
        .project(|e| NameSal {
            ename: e.ename,
            sal: e.sal,
        })
        .materialize()
        .unwrap();
    assert_eq!(rows.len(), 14);
    assert_eq!(
        rows[0],
        NameSal {
            ename: "SMITH".to_owned(),
            sal: 800.0
        }
    );
}

// SELECT e.ename, d.dname FROM emp e JOIN dept d ON e.dept_no = d.dept_no
#[test]
fn employees_joined_with_departments() {
    let store = seeded_store();
    let rows = store
        .scan::<Employee>("emp")
        .unwrap()
        .equi_join(
            store.scan::<Department>("dept").unwrap(),
            |e| e.dept_no,
            |d| d.dept_no,
        )
        .project(|(e, d)| (e.ename, d.dname))
        .materialize()
        .unwrap();
    // Every employee has a department; OPERATIONS contributes nothing.
    assert_eq!(rows.len(), 14);
    assert_eq!(rows[0], ("SMITH".to_owned(), "RESEARCH".to_owned()));
    assert!(!rows.iter().any(|(_, dname)| dname == "OPERATIONS"));
}

// SELECT dept_no, COUNT(*) FROM emp GROUP BY dept_no
#[test]
fn employee_count_per_department() {
    let store = seeded_store();
    let counts = store
        .scan::<Employee>("emp")
        .unwrap()
        .group_by(|e| e.dept_no)
        .project(|g| (*g.key(), g.count()))
        .materialize()
        .unwrap();
    // Groups appear in first-encounter order: SMITH(20), ALLEN(30), CLARK(10).
    assert_eq!(counts, vec![(20, 5), (30, 6), (10, 3)]);
    let total: usize = counts.iter().map(|(_, n)| n).sum();
    assert_eq!(total, 14);
}

// SELECT ename, comm FROM emp WHERE comm IS NOT NULL
#[test]
fn employees_with_commission() {
    let store = seeded_store();
    let rows = store
        .scan::<Employee>("emp")
        .unwrap()
        .filter(Predicate::is_not_null(comm()))
        .project(|e| (e.ename, e.comm))
        .materialize()
        .unwrap();
    // TURNER's zero commission is present, not null.
    assert_eq!(
        rows,
        vec![
            ("ALLEN".to_owned(), Some(300.0)),
            ("WARD".to_owned(), Some(500.0)),
            ("MARTIN".to_owned(), Some(1400.0)),
            ("TURNER".to_owned(), Some(0.0)),
        ]
    );
}

// SELECT e.ename, s.grade FROM emp e JOIN salgrade s ON e.sal BETWEEN s.losal AND s.hisal
#[test]
fn employees_matched_to_salary_grade() {
    let store = seeded_store();
    let rows = store
        .scan::<Employee>("emp")
        .unwrap()
        .range_join(store.scan::<SalaryGrade>("salgrade").unwrap(), |e, s| {
            s.covers(e.sal)
        })
        .project(|(e, s)| (e.ename, s.grade))
        .materialize()
        .unwrap();
    // Well-formed grade table: every employee lands in exactly one band.
    assert_eq!(rows.len(), 14);
    assert!(rows.contains(&("SMITH".to_owned(), 1)));
    assert!(rows.contains(&("TURNER".to_owned(), 3)));
    assert!(rows.contains(&("KING".to_owned(), 5)));
}

// SELECT dept_no, AVG(sal) FROM emp GROUP BY dept_no
#[test]
fn average_salary_per_department() {
    let store = seeded_store();
    let averages = store
        .scan::<Employee>("emp")
        .unwrap()
        .group_by(|e| e.dept_no)
        .try_project(|g| Ok((*g.key(), g.average(|e| e.sal)?)))
        .materialize()
        .unwrap();
    assert_eq!(
        averages,
        vec![
            (20, 10875.0 / 5.0),
            (30, 9400.0 / 6.0),
            (10, 8750.0 / 3.0),
        ]
    );
}

// SELECT e.ename FROM emp e
// WHERE e.sal > (SELECT AVG(sal) FROM emp WHERE dept_no = e.dept_no)
//
// Implemented with per-department averages: each employee is compared to
// the average of their own department.
#[test]
fn employees_earning_more_than_their_department_average() {
    let store = seeded_store();
    let averages: Vec<(i64, f64)> = store
        .scan::<Employee>("emp")
        .unwrap()
        .group_by(|e| e.dept_no)
        .try_project(|g: Group<i64, Employee>| Ok((*g.key(), g.average(|e| e.sal)?)))
        .materialize()
        .unwrap();

    let rows = store
        .scan::<Employee>("emp")
        .unwrap()
        .range_join(Pipeline::from_rows(averages), |e, (dept, avg)| {
            e.dept_no == *dept && e.sal > *avg
        })
        .project(|(e, _)| e.ename)
        .materialize()
        .unwrap();
    assert_eq!(
        rows,
        vec!["ALLEN", "JONES", "BLAKE", "SCOTT", "KING", "FORD"]
    );
}

// SELECT e.ename, m.ename FROM emp e JOIN emp m ON e.mgr = m.emp_no
#[test]
fn employees_joined_with_their_managers() {
    let store = seeded_store();
    let rows = store
        .scan::<Employee>("emp")
        .unwrap()
        .equi_join(
            store.scan::<Employee>("emp").unwrap(),
            |e| e.mgr,
            |m| Some(m.emp_no),
        )
        .project(|(e, m)| (e.ename, m.ename))
        .materialize()
        .unwrap();
    // KING has no manager and drops out of the inner join.
    assert_eq!(rows.len(), 13);
    assert!(rows.contains(&("SMITH".to_owned(), "FORD".to_owned())));
    assert!(rows.contains(&("SCOTT".to_owned(), "JONES".to_owned())));
    assert!(!rows.iter().any(|(e, _)| e == "KING"));
}
